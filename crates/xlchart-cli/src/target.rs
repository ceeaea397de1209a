//! Target loading.
//!
//! A grading target is normally a workbook, extracted on the fly. A `.json`
//! file produced by `xlchart-dump` is accepted too, so a batch of workbooks
//! can be extracted once and regraded against revised keys without touching
//! the originals again.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use xlchart_xlsx::read_workbook;

/// Loads a grading target as a chart-name → properties map.
pub fn load_target(path: &Path) -> Result<Map<String, Value>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if ext.as_deref() == Some("json") {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        return match value {
            Value::Object(map) => Ok(map),
            _ => bail!("{} does not contain a chart map", path.display()),
        };
    }

    let records = read_workbook(path)
        .with_context(|| format!("failed to extract charts from {}", path.display()))?;
    match serde_json::to_value(records)? {
        Value::Object(map) => Ok(map),
        _ => unreachable!("a chart map always serializes to an object"),
    }
}
