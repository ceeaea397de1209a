use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric chart-type code, matching the classic spreadsheet chart-type
/// enumeration so answer keys can use stable integers.
///
/// Only the codes the extractor branches on are named here; any other code is
/// carried through untouched and falls into the default extraction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartType(pub i64);

impl ChartType {
    pub const COLUMN_CLUSTERED: ChartType = ChartType(51);
    pub const COLUMN_STACKED: ChartType = ChartType(52);
    pub const COLUMN_STACKED_100: ChartType = ChartType(53);
    pub const BAR_CLUSTERED: ChartType = ChartType(57);
    pub const BAR_STACKED: ChartType = ChartType(58);
    pub const BAR_STACKED_100: ChartType = ChartType(59);
    pub const LINE: ChartType = ChartType(4);
    pub const LINE_STACKED: ChartType = ChartType(63);
    pub const LINE_STACKED_100: ChartType = ChartType(64);
    pub const LINE_MARKERS: ChartType = ChartType(65);
    pub const LINE_MARKERS_STACKED: ChartType = ChartType(66);
    pub const LINE_MARKERS_STACKED_100: ChartType = ChartType(67);
    pub const AREA: ChartType = ChartType(1);
    pub const AREA_STACKED: ChartType = ChartType(76);
    pub const AREA_STACKED_100: ChartType = ChartType(77);
    pub const PIE: ChartType = ChartType(5);
    pub const DOUGHNUT: ChartType = ChartType(-4120);
    pub const XY_SCATTER: ChartType = ChartType(-4169);
    pub const XY_SCATTER_SMOOTH: ChartType = ChartType(72);
    pub const XY_SCATTER_SMOOTH_NO_MARKERS: ChartType = ChartType(73);
    pub const XY_SCATTER_LINES: ChartType = ChartType(74);
    pub const XY_SCATTER_LINES_NO_MARKERS: ChartType = ChartType(75);
    pub const RADAR: ChartType = ChartType(-4151);
    pub const RADAR_MARKERS: ChartType = ChartType(81);
    pub const RADAR_FILLED: ChartType = ChartType(82);
    pub const TREEMAP: ChartType = ChartType(117);
    pub const HISTOGRAM: ChartType = ChartType(118);
    pub const WATERFALL: ChartType = ChartType(119);
    pub const SUNBURST: ChartType = ChartType(120);
    pub const BOX_WHISKER: ChartType = ChartType(121);
    pub const PARETO: ChartType = ChartType(122);
    pub const FUNNEL: ChartType = ChartType(123);

    pub fn is_column(self) -> bool {
        matches!(
            self,
            ChartType::COLUMN_CLUSTERED | ChartType::COLUMN_STACKED | ChartType::COLUMN_STACKED_100
        )
    }

    pub fn is_bar(self) -> bool {
        matches!(
            self,
            ChartType::BAR_CLUSTERED | ChartType::BAR_STACKED | ChartType::BAR_STACKED_100
        )
    }

    /// 100%-stacked variants never expose the display-unit block on their
    /// value axis.
    pub fn is_stacked_100(self) -> bool {
        matches!(
            self,
            ChartType::COLUMN_STACKED_100
                | ChartType::BAR_STACKED_100
                | ChartType::AREA_STACKED_100
                | ChartType::LINE_STACKED_100
                | ChartType::LINE_MARKERS_STACKED_100
        )
    }

    pub fn is_scatter(self) -> bool {
        matches!(
            self,
            ChartType::XY_SCATTER
                | ChartType::XY_SCATTER_SMOOTH
                | ChartType::XY_SCATTER_SMOOTH_NO_MARKERS
                | ChartType::XY_SCATTER_LINES
                | ChartType::XY_SCATTER_LINES_NO_MARKERS
        )
    }

    pub fn is_radar(self) -> bool {
        matches!(
            self,
            ChartType::RADAR | ChartType::RADAR_MARKERS | ChartType::RADAR_FILLED
        )
    }

    pub fn is_box_whisker(self) -> bool {
        self == ChartType::BOX_WHISKER
    }

    pub fn is_histogram(self) -> bool {
        self == ChartType::HISTOGRAM
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ChartType {
    fn from(code: i64) -> Self {
        ChartType(code)
    }
}

/// Axis type as carried in `AxisRecord::axis_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisType(pub i64);

impl AxisType {
    pub const CATEGORY: AxisType = AxisType(1);
    pub const VALUE: AxisType = AxisType(2);
    pub const SERIES: AxisType = AxisType(3);

    pub fn is_category(self) -> bool {
        self == AxisType::CATEGORY
    }

    pub fn is_value(self) -> bool {
        self == AxisType::VALUE
    }

    pub fn is_series(self) -> bool {
        self == AxisType::SERIES
    }

    /// Label prefix used by the grading report (`x-axis1.title`, ...).
    pub fn label(self) -> &'static str {
        match self {
            AxisType::VALUE => "y-axis",
            AxisType::SERIES => "series-axis",
            _ => "x-axis",
        }
    }
}
