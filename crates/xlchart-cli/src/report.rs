//! Tab-separated grading reports.
//!
//! Each row is `chart<TAB>property<TAB>value<TAB>result`. String values are
//! written verbatim; every other value is rendered as JSON, which keeps list
//! values on one line and makes the value column machine-recoverable.

use std::io::{self, Write};

use serde_json::Value;

use crate::check::CheckResult;

pub const HEADER: &str = "Chart\tProperty\tValue\tResult";

/// Writes grading rows, optionally preceded by the column header.
pub fn write_report<W: Write>(out: &mut W, rows: &[CheckResult], header: bool) -> io::Result<()> {
    if header {
        writeln!(out, "{HEADER}")?;
    }
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            row.chart,
            row.property,
            render_value(&row.value),
            row.correct
        )?;
    }
    Ok(())
}

/// Renders a value for the report's value column.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Recovers `(chart, property, value)` triples from report text, skipping the
/// header if present. Rows that do not have four columns are ignored.
pub fn parse_report(text: &str) -> Vec<(String, String, String)> {
    text.lines()
        .filter(|line| *line != HEADER)
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let chart = fields.next()?;
            let property = fields.next()?;
            let value = fields.next()?;
            fields.next()?;
            Some((chart.to_owned(), property.to_owned(), value.to_owned()))
        })
        .collect()
}
