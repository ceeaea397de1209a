//! Bulk chart-image export.
//!
//! Every chart in a workbook is rendered to `dest/<workbook stem>/<name>.svg`.
//! Embedded charts are named `{sheet}_{object}` and chart sheets by their
//! sheet name, each run through [`sanitize_name`] so the result is a safe
//! file name on every platform.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use xlchart_xlsx::open_charts;

use crate::render::render_svg;

/// Exports all charts in a workbook, returning the paths written.
///
/// Existing files are left untouched; each skip is reported on stderr so a
/// re-run over a partially exported directory is safe and loud.
pub fn export_workbook(workbook: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let stem = workbook
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("workbook has no usable file name: {}", workbook.display()))?;
    let chart_dir = dest.join(stem);
    fs::create_dir_all(&chart_dir)
        .with_context(|| format!("failed to create {}", chart_dir.display()))?;

    let mut written = Vec::new();
    for chart in open_charts(workbook)? {
        let name = match &chart.object_name {
            Some(object) => format!("{}_{}", chart.sheet_name, object),
            None => chart.sheet_name.clone(),
        };
        let path = chart_dir.join(format!("{}.svg", sanitize_name(&name)));
        if path.exists() {
            eprintln!("Error: File already exists: {}", path.display());
            continue;
        }
        let record = chart.record()?;
        let series: Vec<_> = chart.chart.cached_series().collect();
        let svg = render_svg(&record, &series);
        fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Makes a chart or workbook name safe to use as a file name.
///
/// Fullwidth ASCII variants (U+FF01..=U+FF5E) fold to their ASCII forms
/// first, so a fullwidth colon is stripped like a plain one. Whitespace,
/// including the ideographic space, becomes `_`, and characters forbidden in
/// file names are dropped.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\u{ff01}'..='\u{ff5e}' => char::from_u32(c as u32 - 0xfee0).unwrap_or(c),
            c => c,
        })
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_becomes_underscores() {
        assert_eq!(sanitize_name("Graph 1"), "Graph_1");
        assert_eq!(sanitize_name("売上\u{3000}集計"), "売上_集計");
        assert_eq!(sanitize_name("a\tb\nc"), "a_b_c");
    }

    #[test]
    fn forbidden_characters_are_dropped() {
        assert_eq!(sanitize_name("Q1/Q2: \"plan\"?"), "Q1Q2_plan");
        assert_eq!(sanitize_name("<a>|*b*"), "ab");
    }

    #[test]
    fn fullwidth_forms_fold_to_ascii_before_filtering() {
        // Fullwidth colon and question mark fold to ASCII and are dropped.
        assert_eq!(sanitize_name("売上\u{ff1a}2024\u{ff1f}"), "売上2024");
        // Fullwidth letters fold to their ASCII forms.
        assert_eq!(sanitize_name("\u{ff21}\u{ff22}\u{ff23}"), "ABC");
    }
}
