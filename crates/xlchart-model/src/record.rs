use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chart_type::{AxisType, ChartType};

pub const AXIS_GROUP_PRIMARY: i64 = 1;
pub const AXIS_GROUP_SECONDARY: i64 = 2;

/// Chart records keyed by chart name. Embedded charts use the chart object
/// name, chart sheets the sheet name.
pub type ChartRecordMap = BTreeMap<String, ChartRecord>;

/// Flattened configuration of a single chart.
///
/// The serde schema uses kebab-case keys (`chart-type`, `legend-position`, ...)
/// which is exactly the key spelling the JSON dump and answer files use.
/// Fields that do not apply to a chart's category are `None` and disappear
/// from the serialized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChartRecord {
    pub name: String,
    pub chart_type: ChartType,
    /// Title text; empty when the chart has no title.
    pub title: String,
    /// Whether the title overlays the plot area instead of reserving space.
    pub title_overlay: bool,
    /// Legend position code; `0` when the chart has no legend.
    pub legend_position: i64,
    #[serde(default)]
    pub axis: Vec<AxisRecord>,
    /// Present for every chart category except box-whisker and histogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesRecord>>,
    /// Present only for histogram charts, one record per chart group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins: Option<Vec<BinRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AxisRecord {
    pub axis_type: AxisType,
    pub axis_group: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title rotation in degrees; omitted for box-whisker charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_orientation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_unit_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_unit_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_label_spacing: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_label_spacing_auto: Option<bool>,
    /// Number format applied to the tick labels (`#,##0.00` style codes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_label_format: Option<String>,
    /// Where the perpendicular axis crosses: `autoZero`, `min`, `max` or
    /// `custom` (see `crosses_at`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosses_at: Option<f64>,
    /// Display-unit token (`hundreds`, `thousands`, ...); only present when
    /// the axis shows a display-unit label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_unit_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logarithmic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl AxisRecord {
    pub fn new(axis_type: AxisType, axis_group: i64) -> Self {
        Self {
            axis_type,
            axis_group,
            title: None,
            title_orientation: None,
            min_scale: None,
            min_scale_auto: None,
            max_scale: None,
            max_scale_auto: None,
            major_unit: None,
            major_unit_auto: None,
            minor_unit: None,
            minor_unit_auto: None,
            category_names: None,
            tick_label_spacing: None,
            tick_label_spacing_auto: None,
            tick_label_format: None,
            crosses: None,
            crosses_at: None,
            display_unit: None,
            display_unit_label: None,
            logarithmic: None,
            reverse: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeriesRecord {
    /// 0-based series index parsed from the generating formula's trailing
    /// ordinal. Unique per chart group.
    pub index: i64,
    pub name: String,
    pub chart_type: ChartType,
    /// The generating formula, `=SERIES(name, x-range, y-range, order)`.
    pub formula: String,
    pub data_range_name: String,
    pub data_range_x_values: String,
    pub data_range_y_values: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_labels_range: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_labels_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_labels_x_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_labels_y_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_labels_marker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_lines: Option<bool>,
    /// Error-bar end style: 1 = cap, 2 = no cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bars_end_style: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trendline: Option<Vec<TrendlineRecord>>,
    pub axis_group: i64,
    /// 1-based chart group this series belongs to.
    pub chart_group: i64,
    /// Series overlap; column/bar groups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<i64>,
    /// Gap width; column/bar groups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_width: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrendlineRecord {
    /// Trendline type code: exponential 5, linear -4132, logarithmic -4133,
    /// moving average 6, polynomial 3, power 4.
    pub trendline_type: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept: Option<f64>,
    pub intercept_auto: bool,
    pub display_equation: bool,
    pub display_r_squared: bool,
    /// Displayed label text; captured only when at least one display flag is
    /// set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BinRecord {
    /// 1-based chart group.
    pub chart_group: i64,
    /// Binning mode: `automatic`, `binWidth`, `binCount` or `category`.
    pub bins_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins_count: Option<i64>,
    pub bins_overflow_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins_overflow: Option<f64>,
    pub bins_underflow_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins_underflow: Option<f64>,
}
