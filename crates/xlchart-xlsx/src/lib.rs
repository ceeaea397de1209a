//! Chart configuration straight out of `.xlsx` packages.
//!
//! This crate works at the ZIP/Open Packaging Convention layer: the workbook
//! is read fully into a part map, chart parts are located through the
//! relationship graph (workbook -> sheet -> drawing -> chart), and each chart
//! part is parsed into an [`XlsxChart`] that implements the
//! [`ChartSource`](xlchart_extract::ChartSource) capability traits. No
//! spreadsheet host is involved; auto-computed values (scale bounds, units)
//! that only a host would know are reported through their `-auto` flags.

mod chart;
mod discover;
mod opc;
mod package;

pub use chart::{CachedSeries, XlsxAxis, XlsxChart, XlsxGroup, XlsxSeries};
pub use discover::ChartRef;
pub use package::WorkbookPackage;

use std::path::{Path, PathBuf};

use thiserror::Error;
use xlchart_extract::SourceError;
use xlchart_model::{ChartRecord, ChartRecordMap};

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("open workbook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read workbook archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("duplicate part name after normalization (invalid archive): {0}")]
    DuplicatePart(String),
    #[error("part is not valid UTF-8: {part}: {source}")]
    NonUtf8 {
        part: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: roxmltree::Error,
    },
    #[error("missing part: {0}")]
    MissingPart(String),
    #[error("chart {chart}: {source}")]
    Extract {
        chart: String,
        #[source]
        source: SourceError,
    },
}

/// One chart found in a workbook, ready for extraction or rendering.
#[derive(Debug, Clone)]
pub struct WorkbookChart {
    /// Name of the worksheet or chart sheet holding the chart.
    pub sheet_name: String,
    /// Drawing object name for embedded charts; `None` for chart sheets.
    pub object_name: Option<String>,
    pub chart: XlsxChart,
}

impl WorkbookChart {
    /// Record-map key: the object name for embedded charts, the sheet name
    /// for chart sheets.
    pub fn key(&self) -> &str {
        self.object_name.as_deref().unwrap_or(&self.sheet_name)
    }

    pub fn record(&self) -> Result<ChartRecord, XlsxError> {
        xlchart_extract::extract(&self.chart).map_err(|source| XlsxError::Extract {
            chart: self.key().to_string(),
            source,
        })
    }
}

/// Open a workbook and parse every chart in it, worksheets first (in workbook
/// order), then chart sheets. The record map built from this list re-sorts
/// the charts by name.
pub fn open_charts(path: &Path) -> Result<Vec<WorkbookChart>, XlsxError> {
    let package = WorkbookPackage::open(path)?;
    charts_in_package(&package)
}

pub fn charts_in_package(package: &WorkbookPackage) -> Result<Vec<WorkbookChart>, XlsxError> {
    let mut out = Vec::new();
    for chart_ref in discover::discover_charts(package)? {
        let xml = package
            .part(&chart_ref.part)
            .ok_or_else(|| XlsxError::MissingPart(chart_ref.part.clone()))?;
        let chart = XlsxChart::parse(chart_ref.key(), xml, &chart_ref.part)?;
        out.push(WorkbookChart {
            sheet_name: chart_ref.sheet_name,
            object_name: chart_ref.object_name,
            chart,
        });
    }
    Ok(out)
}

/// Extract the full chart-record mapping for a workbook, keyed by chart name.
pub fn read_workbook(path: &Path) -> Result<ChartRecordMap, XlsxError> {
    let mut map = ChartRecordMap::new();
    for chart in open_charts(path)? {
        let record = chart.record()?;
        map.insert(chart.key().to_string(), record);
    }
    Ok(map)
}
