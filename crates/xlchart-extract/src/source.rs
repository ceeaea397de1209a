use thiserror::Error;
use xlchart_model::{AxisType, ChartType};

/// Failure reading a property from the backing chart store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SourceError(String);

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        SourceError(message.into())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTitle {
    pub text: String,
    pub overlay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTitle {
    pub caption: String,
    /// Rotation in degrees; `None` means the source reports no rotation.
    pub orientation: Option<i64>,
}

/// Min/max scale with auto flags. A `None` value with `auto = true` means the
/// host computes the bound and the store does not record it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisScale {
    pub min: Option<f64>,
    pub min_auto: bool,
    pub max: Option<f64>,
    pub max_auto: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisUnits {
    pub major: Option<f64>,
    pub major_auto: bool,
    pub minor: Option<f64>,
    pub minor_auto: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickLabelSpacing {
    pub value: Option<i64>,
    pub auto: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisCrosses {
    /// `autoZero`, `min`, `max` or `custom`.
    pub crosses: String,
    pub at: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    /// Unit token (`hundreds`, `thousands`, ...).
    pub unit: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataLabelFlags {
    pub range: bool,
    pub name: bool,
    pub x_values: bool,
    pub y_values: bool,
    pub marker: bool,
    pub leader_lines: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendlineInfo {
    pub trendline_type: i64,
    pub intercept: Option<f64>,
    pub intercept_auto: bool,
    pub display_equation: bool,
    pub display_r_squared: bool,
    /// Raw label text; the extractor keeps it only when a display flag is set.
    pub label_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinGroup {
    pub bins_type: String,
    pub bin_width: Option<f64>,
    pub bins_count: Option<i64>,
    pub overflow_enabled: bool,
    pub overflow: Option<f64>,
    pub underflow_enabled: bool,
    pub underflow: Option<f64>,
}

/// One axis of a chart.
pub trait AxisSource {
    fn axis_type(&self) -> AxisType;
    fn axis_group(&self) -> i64;
    fn title(&self) -> SourceResult<Option<AxisTitle>>;
    fn scale(&self) -> SourceResult<AxisScale>;
    fn units(&self) -> SourceResult<AxisUnits>;
    fn category_names(&self) -> SourceResult<Option<Vec<String>>>;
    fn tick_label_spacing(&self) -> SourceResult<TickLabelSpacing>;
    fn tick_label_format(&self) -> SourceResult<Option<String>>;
    fn crosses(&self) -> SourceResult<Option<AxisCrosses>>;
    fn display_unit(&self) -> SourceResult<Option<DisplayUnit>>;
    fn logarithmic(&self) -> SourceResult<bool>;
    fn reverse(&self) -> SourceResult<bool>;
}

/// One series within a chart group.
pub trait SeriesSource {
    fn chart_type(&self) -> ChartType;
    /// The generating formula, `=SERIES(name, x-range, y-range, order)`.
    fn formula(&self) -> SourceResult<String>;
    /// Display name of the series.
    fn name(&self) -> SourceResult<String>;
    /// `None` when the series shows no data labels.
    fn data_labels(&self) -> SourceResult<Option<DataLabelFlags>>;
    /// `None` when the series has no error bars.
    fn error_bars_end_style(&self) -> SourceResult<Option<i64>>;
    fn trendlines(&self) -> SourceResult<Vec<TrendlineInfo>>;
    fn axis_group(&self) -> SourceResult<i64>;
}

/// One chart group (one plot-type block within the plot area).
pub trait ChartGroupSource {
    type Series: SeriesSource;

    fn series(&self) -> SourceResult<Vec<Self::Series>>;
    fn overlap(&self) -> SourceResult<Option<i64>>;
    fn gap_width(&self) -> SourceResult<Option<i64>>;
    /// Histogram binning options; `None` for non-histogram groups.
    fn bins(&self) -> SourceResult<Option<BinGroup>>;
}

/// Capability interface over one chart of a backing store.
///
/// Production sources read an `.xlsx` package; test sources return fixed
/// records. Accessors return `Result` because a backing store read can fail;
/// such failures propagate out of extraction unmasked.
pub trait ChartSource {
    type Axis: AxisSource;
    type Group: ChartGroupSource;

    fn name(&self) -> String;
    fn chart_type(&self) -> ChartType;
    fn title(&self) -> SourceResult<Option<ChartTitle>>;
    /// Legend position code; `0` when the chart has no legend.
    fn legend_position(&self) -> SourceResult<i64>;
    fn axes(&self) -> SourceResult<Vec<Self::Axis>>;
    fn chart_groups(&self) -> SourceResult<Vec<Self::Group>>;
}
