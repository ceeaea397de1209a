//! Parsed chart parts and their [`ChartSource`] implementation.
//!
//! A chart part is parsed eagerly into owned [`XlsxChart`] data; the source
//! traits then hand out clones of the pre-parsed values, so extraction itself
//! cannot fail on XML structure. Classic `c:chartSpace` parts and ChartEx
//! (`cx:`) parts land in the same shape.

mod chart_ex;
mod chart_space;
mod xml;

use roxmltree::Document;

use xlchart_extract::{
    AxisCrosses, AxisScale, AxisSource, AxisTitle, AxisUnits, BinGroup, ChartGroupSource,
    ChartSource, ChartTitle, DataLabelFlags, DisplayUnit, SeriesSource, SourceResult,
    TickLabelSpacing, TrendlineInfo,
};
use xlchart_model::{AxisType, ChartType};

use crate::XlsxError;

const CHART_EX_NS: &str = "http://schemas.microsoft.com/office/drawing/2014/chartex";

#[derive(Debug, Clone)]
pub struct XlsxChart {
    pub(crate) name: String,
    pub(crate) chart_type: ChartType,
    pub(crate) title: Option<ChartTitle>,
    pub(crate) legend_position: i64,
    pub(crate) axes: Vec<XlsxAxis>,
    pub(crate) groups: Vec<XlsxGroup>,
}

#[derive(Debug, Clone)]
pub struct XlsxAxis {
    pub(crate) axis_type: AxisType,
    pub(crate) axis_group: i64,
    pub(crate) title: Option<AxisTitle>,
    pub(crate) scale: AxisScale,
    pub(crate) units: AxisUnits,
    pub(crate) category_names: Option<Vec<String>>,
    pub(crate) tick_label_spacing: TickLabelSpacing,
    pub(crate) tick_label_format: Option<String>,
    pub(crate) crosses: Option<AxisCrosses>,
    pub(crate) display_unit: Option<DisplayUnit>,
    pub(crate) logarithmic: bool,
    pub(crate) reverse: bool,
}

impl XlsxAxis {
    pub(crate) fn new(axis_type: AxisType, axis_group: i64) -> Self {
        XlsxAxis {
            axis_type,
            axis_group,
            title: None,
            scale: AxisScale {
                min: None,
                min_auto: true,
                max: None,
                max_auto: true,
            },
            units: AxisUnits {
                major: None,
                major_auto: true,
                minor: None,
                minor_auto: true,
            },
            category_names: None,
            tick_label_spacing: TickLabelSpacing {
                value: None,
                auto: true,
            },
            tick_label_format: None,
            crosses: None,
            display_unit: None,
            logarithmic: false,
            reverse: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct XlsxGroup {
    pub(crate) series: Vec<XlsxSeries>,
    pub(crate) overlap: Option<i64>,
    pub(crate) gap_width: Option<i64>,
    pub(crate) bins: Option<BinGroup>,
}

#[derive(Debug, Clone)]
pub struct XlsxSeries {
    pub(crate) chart_type: ChartType,
    pub(crate) formula: String,
    pub(crate) name: String,
    pub(crate) data_labels: Option<DataLabelFlags>,
    pub(crate) error_bars_end_style: Option<i64>,
    pub(crate) trendlines: Vec<TrendlineInfo>,
    pub(crate) axis_group: i64,
    pub(crate) cached: CachedSeries,
}

/// Cached plot values carried in the chart part, used for rendering chart
/// images without evaluating the workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedSeries {
    pub name: String,
    pub categories: Vec<String>,
    /// Cached X values; empty for category-plotted series.
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl XlsxChart {
    /// Parse a chart part. Dispatches on the root namespace: ChartEx parts
    /// (`cx:chartSpace`) hold the modern chart types (histogram, box &
    /// whisker, ...), everything else is a classic `c:chartSpace`.
    pub fn parse(name: &str, xml: &[u8], part: &str) -> Result<XlsxChart, XlsxError> {
        let text = std::str::from_utf8(xml).map_err(|source| XlsxError::NonUtf8 {
            part: part.to_string(),
            source,
        })?;
        let doc = Document::parse(text).map_err(|source| XlsxError::Xml {
            part: part.to_string(),
            source,
        })?;

        let root_ns = doc.root_element().tag_name().namespace().unwrap_or("");
        if root_ns == CHART_EX_NS {
            Ok(chart_ex::parse(name, &doc))
        } else {
            Ok(chart_space::parse(name, &doc))
        }
    }

    pub fn chart_type_code(&self) -> ChartType {
        self.chart_type
    }

    /// Cached series values across all chart groups, in plot order.
    pub fn cached_series(&self) -> impl Iterator<Item = &CachedSeries> {
        self.groups
            .iter()
            .flat_map(|g| g.series.iter().map(|s| &s.cached))
    }
}

impl ChartSource for XlsxChart {
    type Axis = XlsxAxis;
    type Group = XlsxGroup;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    fn title(&self) -> SourceResult<Option<ChartTitle>> {
        Ok(self.title.clone())
    }

    fn legend_position(&self) -> SourceResult<i64> {
        Ok(self.legend_position)
    }

    fn axes(&self) -> SourceResult<Vec<XlsxAxis>> {
        Ok(self.axes.clone())
    }

    fn chart_groups(&self) -> SourceResult<Vec<XlsxGroup>> {
        Ok(self.groups.clone())
    }
}

impl AxisSource for XlsxAxis {
    fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    fn axis_group(&self) -> i64 {
        self.axis_group
    }

    fn title(&self) -> SourceResult<Option<AxisTitle>> {
        Ok(self.title.clone())
    }

    fn scale(&self) -> SourceResult<AxisScale> {
        Ok(self.scale)
    }

    fn units(&self) -> SourceResult<AxisUnits> {
        Ok(self.units)
    }

    fn category_names(&self) -> SourceResult<Option<Vec<String>>> {
        Ok(self.category_names.clone())
    }

    fn tick_label_spacing(&self) -> SourceResult<TickLabelSpacing> {
        Ok(self.tick_label_spacing)
    }

    fn tick_label_format(&self) -> SourceResult<Option<String>> {
        Ok(self.tick_label_format.clone())
    }

    fn crosses(&self) -> SourceResult<Option<AxisCrosses>> {
        Ok(self.crosses.clone())
    }

    fn display_unit(&self) -> SourceResult<Option<DisplayUnit>> {
        Ok(self.display_unit.clone())
    }

    fn logarithmic(&self) -> SourceResult<bool> {
        Ok(self.logarithmic)
    }

    fn reverse(&self) -> SourceResult<bool> {
        Ok(self.reverse)
    }
}

impl ChartGroupSource for XlsxGroup {
    type Series = XlsxSeries;

    fn series(&self) -> SourceResult<Vec<XlsxSeries>> {
        Ok(self.series.clone())
    }

    fn overlap(&self) -> SourceResult<Option<i64>> {
        Ok(self.overlap)
    }

    fn gap_width(&self) -> SourceResult<Option<i64>> {
        Ok(self.gap_width)
    }

    fn bins(&self) -> SourceResult<Option<BinGroup>> {
        Ok(self.bins.clone())
    }
}

impl SeriesSource for XlsxSeries {
    fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    fn formula(&self) -> SourceResult<String> {
        Ok(self.formula.clone())
    }

    fn name(&self) -> SourceResult<String> {
        Ok(self.name.clone())
    }

    fn data_labels(&self) -> SourceResult<Option<DataLabelFlags>> {
        Ok(self.data_labels)
    }

    fn error_bars_end_style(&self) -> SourceResult<Option<i64>> {
        Ok(self.error_bars_end_style)
    }

    fn trendlines(&self) -> SourceResult<Vec<TrendlineInfo>> {
        Ok(self.trendlines.clone())
    }

    fn axis_group(&self) -> SourceResult<i64> {
        Ok(self.axis_group)
    }
}
