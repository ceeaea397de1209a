//! JSON dumps of extracted chart configuration.

use anyhow::Result;
use xlchart_model::ChartRecordMap;

/// Renders a workbook's chart records as pretty-printed JSON with a trailing
/// newline, ready for a file or stdout.
pub fn dump_records(records: &ChartRecordMap) -> Result<String> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xlchart_model::{ChartRecord, ChartType};

    #[test]
    fn dump_is_pretty_printed_and_newline_terminated() {
        let mut records = ChartRecordMap::new();
        records.insert(
            "Chart1".to_owned(),
            ChartRecord {
                name: "Chart1".to_owned(),
                chart_type: ChartType::PIE,
                title: String::new(),
                title_overlay: false,
                legend_position: 0,
                axis: Vec::new(),
                series: Some(Vec::new()),
                bins: None,
            },
        );
        let text = dump_records(&records).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"chart-type\": 5"));
        assert_eq!(text.matches('\n').count(), text.lines().count());
    }
}
