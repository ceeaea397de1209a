//! `xlchart-model` defines the chart configuration records shared by the
//! xlchart tools.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the extractor (`xlchart-extract`) which fills records from a chart source
//! - the `.xlsx` chart-part reader (`xlchart-xlsx`)
//! - the grading CLI via `serde` (JSON-safe, kebab-case key schema)

mod chart_type;
mod formula;
mod record;

pub use chart_type::{AxisType, ChartType};
pub use formula::{split_series_formula, SeriesFormula, SeriesFormulaError};
pub use record::{
    AxisRecord, BinRecord, ChartRecord, ChartRecordMap, SeriesRecord, TrendlineRecord,
    AXIS_GROUP_PRIMARY, AXIS_GROUP_SECONDARY,
};
