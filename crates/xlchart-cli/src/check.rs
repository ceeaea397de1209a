//! Answer-key matcher.
//!
//! Grading walks the answer key, never the target: only properties the key
//! names produce rows, and a chart or sub-record missing from the target
//! still yields rows (all incorrect) so a blank submission grades cleanly.
//!
//! Sub-records are matched by identity keys rather than position where the
//! key provides one: axes by `(axis-type, axis-group)` with both defaulting
//! to 1, series by `index` defaulting to the key entry's position, bins by
//! `chart-group` defaulting to position + 1. The first matching target entry
//! wins.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use xlchart_model::AxisType;

/// One graded property.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub chart: String,
    pub property: String,
    /// The value found in the target, reported verbatim. A missing scalar
    /// reports as `""`, a missing list as `[]`.
    pub value: Value,
    pub correct: bool,
}

/// Grades an extracted target against an answer key.
pub fn compare(target: &Map<String, Value>, answer: &Map<String, Value>) -> Vec<CheckResult> {
    let mut result = Vec::new();
    let empty = Map::new();

    for (chart_name, answer_chart) in answer {
        let answer_chart = as_object(answer_chart).unwrap_or(&empty);
        let target_chart = target
            .get(chart_name)
            .and_then(as_object)
            .unwrap_or(&empty);

        for (prop_name, answer_value) in answer_chart {
            match prop_name.as_str() {
                "axis" => check_axis(
                    list_field(target_chart, "axis"),
                    as_array(answer_value),
                    chart_name,
                    &mut result,
                ),
                "series" => check_series(
                    list_field(target_chart, "series"),
                    as_array(answer_value),
                    chart_name,
                    &mut result,
                ),
                "bins" => check_bins(
                    list_field(target_chart, "bins"),
                    as_array(answer_value),
                    chart_name,
                    &mut result,
                ),
                _ => {
                    let (value, correct) = grade(target_chart.get(prop_name), answer_value);
                    result.push(CheckResult {
                        chart: chart_name.clone(),
                        property: prop_name.clone(),
                        value,
                        correct,
                    });
                }
            }
        }
    }

    result
}

fn check_axis(
    target_list: &[Value],
    answer_list: &[Value],
    chart_name: &str,
    result: &mut Vec<CheckResult>,
) {
    let empty = Map::new();

    // Keyed by (axis-type, axis-group), first occurrence wins on duplicates.
    let mut by_key: BTreeMap<(i64, i64), &Map<String, Value>> = BTreeMap::new();
    for item in target_list.iter().filter_map(as_object) {
        let key = (
            int_field(item, "axis-type").unwrap_or(1),
            int_field(item, "axis-group").unwrap_or(1),
        );
        by_key.entry(key).or_insert(item);
    }

    for answer in answer_list.iter().filter_map(as_object) {
        let axis_type = int_field(answer, "axis-type").unwrap_or(1);
        let axis_group = int_field(answer, "axis-group").unwrap_or(1);

        let target = by_key.get(&(axis_type, axis_group)).copied().unwrap_or(&empty);

        for (prop_name, answer_value) in answer {
            if prop_name == "axis-type" || prop_name == "axis-group" {
                continue;
            }
            let label = format!("{}{axis_group}.{prop_name}", AxisType(axis_type).label());
            let (value, correct) = grade(target.get(prop_name), answer_value);
            result.push(CheckResult {
                chart: chart_name.to_owned(),
                property: label,
                value,
                correct,
            });
        }
    }
}

fn check_series(
    target_list: &[Value],
    answer_list: &[Value],
    chart_name: &str,
    result: &mut Vec<CheckResult>,
) {
    let empty = Map::new();

    for (i, answer) in answer_list.iter().filter_map(as_object).enumerate() {
        let index = int_field(answer, "index").unwrap_or(i as i64);

        // A target series without an index never matches.
        let target = target_list
            .iter()
            .filter_map(as_object)
            .find(|item| int_field(item, "index").unwrap_or(-1) == index)
            .unwrap_or(&empty);

        for (prop_name, answer_value) in answer {
            if prop_name == "index" {
                continue;
            }
            let label = format!("series{index}.{prop_name}");
            let (value, correct) = grade(target.get(prop_name), answer_value);
            result.push(CheckResult {
                chart: chart_name.to_owned(),
                property: label,
                value,
                correct,
            });
        }
    }
}

fn check_bins(
    target_list: &[Value],
    answer_list: &[Value],
    chart_name: &str,
    result: &mut Vec<CheckResult>,
) {
    let empty = Map::new();

    for (i, answer) in answer_list.iter().filter_map(as_object).enumerate() {
        let chart_group = int_field(answer, "chart-group").unwrap_or(i as i64 + 1);

        let target = target_list
            .iter()
            .filter_map(as_object)
            .find(|item| int_field(item, "chart-group").unwrap_or(-1) == chart_group)
            .unwrap_or(&empty);

        for (prop_name, answer_value) in answer {
            if prop_name == "chart-group" {
                continue;
            }
            let label = format!("bins{chart_group}.{prop_name}");
            let (value, correct) = grade(target.get(prop_name), answer_value);
            result.push(CheckResult {
                chart: chart_name.to_owned(),
                property: label,
                value,
                correct,
            });
        }
    }
}

/// Compares one target value against the expected one and picks the value to
/// report. Lists compare element-wise in order; numbers compare by value so
/// an integer target matches a float answer and vice versa.
fn grade(target: Option<&Value>, answer: &Value) -> (Value, bool) {
    let reported = match target {
        Some(value) => value.clone(),
        None if answer.is_array() => Value::Array(Vec::new()),
        None => Value::String(String::new()),
    };
    let correct = values_equal(&reported, answer);
    (reported, correct)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

fn as_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

fn as_array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn list_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key).map(as_array).unwrap_or(&[])
}

fn int_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = map.get(key)?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    // Answer keys written by hand sometimes carry `2.0` for `2`.
    value.as_f64().map(|f| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn rows(target: Value, answer: Value) -> Vec<(String, String, Value, bool)> {
        compare(&map(target), &map(answer))
            .into_iter()
            .map(|r| (r.chart, r.property, r.value, r.correct))
            .collect()
    }

    #[test]
    fn scalar_property_grades_by_equality() {
        let result = rows(
            json!({"Chart1": {"legend-position": 2}}),
            json!({"Chart1": {"legend-position": 2}}),
        );
        assert_eq!(
            result,
            [("Chart1".into(), "legend-position".into(), json!(2), true)]
        );
    }

    #[test]
    fn integer_target_matches_float_answer() {
        let result = rows(
            json!({"Chart1": {"legend-position": 2}}),
            json!({"Chart1": {"legend-position": 2.0}}),
        );
        assert!(result[0].3);
    }

    #[test]
    fn missing_chart_reports_empty_values_and_false() {
        let result = rows(
            json!({}),
            json!({"Chart1": {
                "chart-type": 51,
                "axis": [{"min-scale": 0.0}],
                "series": [{"name": "A", "y-values": ["1", "2"]}],
            }}),
        );
        assert_eq!(
            result,
            [
                ("Chart1".into(), "chart-type".into(), json!(""), false),
                ("Chart1".into(), "x-axis1.min-scale".into(), json!(""), false),
                ("Chart1".into(), "series0.name".into(), json!(""), false),
                ("Chart1".into(), "series0.y-values".into(), json!([]), false),
            ]
        );
    }

    #[test]
    fn axis_matches_on_type_and_group_with_defaults() {
        let target = json!({"Chart1": {"axis": [
            {"axis-type": 2, "axis-group": 1, "max-scale": 100.0},
            {"max-scale": 10.0},
        ]}});
        let answer = json!({"Chart1": {"axis": [
            {"axis-type": 2, "max-scale": 100.0},
            {"max-scale": 10.0},
        ]}});
        let result = rows(target, answer);
        assert_eq!(
            result,
            [
                ("Chart1".into(), "y-axis1.max-scale".into(), json!(100.0), true),
                ("Chart1".into(), "x-axis1.max-scale".into(), json!(10.0), true),
            ]
        );
    }

    #[test]
    fn duplicate_axis_keys_resolve_to_the_first_occurrence() {
        let target = json!({"Chart1": {"axis": [
            {"axis-type": 2, "max-scale": 1.0},
            {"axis-type": 2, "max-scale": 2.0},
        ]}});
        let answer = json!({"Chart1": {"axis": [
            {"axis-type": 2, "max-scale": 1.0},
        ]}});
        let result = rows(target, answer);
        assert_eq!(result[0].2, json!(1.0));
        assert!(result[0].3);
    }

    #[test]
    fn series_axis_label_includes_the_group_number() {
        let result = rows(
            json!({"Chart1": {"axis": [
                {"axis-type": 3, "axis-group": 2, "reverse": true},
            ]}}),
            json!({"Chart1": {"axis": [
                {"axis-type": 3, "axis-group": 2, "reverse": true},
            ]}}),
        );
        assert_eq!(result[0].1, "series-axis2.reverse");
        assert!(result[0].3);
    }

    #[test]
    fn series_matches_by_index_not_position() {
        let target = json!({"Chart1": {"series": [
            {"index": 1, "name": "Second"},
            {"index": 0, "name": "First"},
        ]}});
        let answer = json!({"Chart1": {"series": [
            {"name": "First"},
            {"name": "Second"},
        ]}});
        let result = rows(target, answer);
        assert_eq!(
            result,
            [
                ("Chart1".into(), "series0.name".into(), json!("First"), true),
                ("Chart1".into(), "series1.name".into(), json!("Second"), true),
            ]
        );
    }

    #[test]
    fn target_series_without_index_never_matches() {
        let result = rows(
            json!({"Chart1": {"series": [{"name": "A"}]}}),
            json!({"Chart1": {"series": [{"index": 0, "name": "A"}]}}),
        );
        assert_eq!(
            result,
            [("Chart1".into(), "series0.name".into(), json!(""), false)]
        );
    }

    #[test]
    fn bins_match_by_chart_group_with_positional_default() {
        let target = json!({"Chart1": {"bins": [
            {"chart-group": 1, "bin-width": 5.0},
            {"chart-group": 2, "bins-type": "binCount"},
        ]}});
        let answer = json!({"Chart1": {"bins": [
            {"bin-width": 5.0},
            {"bins-type": "binCount"},
        ]}});
        let result = rows(target, answer);
        assert_eq!(
            result,
            [
                ("Chart1".into(), "bins1.bin-width".into(), json!(5.0), true),
                ("Chart1".into(), "bins2.bins-type".into(), json!("binCount"), true),
            ]
        );
    }

    #[test]
    fn list_values_compare_in_order() {
        let target = json!({"Chart1": {"series": [
            {"index": 0, "y-values": ["2", "1"]},
        ]}});
        let answer = json!({"Chart1": {"series": [
            {"index": 0, "y-values": ["1", "2"]},
        ]}});
        let result = rows(target, answer);
        assert_eq!(result[0].2, json!(["2", "1"]));
        assert!(!result[0].3);
    }

    #[test]
    fn rows_follow_answer_key_order() {
        let target = json!({
            "Chart B": {"chart-type": 4},
            "Chart A": {"chart-type": 51},
        });
        let answer = json!({
            "Chart B": {"chart-type": 4, "title": "Trend"},
            "Chart A": {"chart-type": 51},
        });
        let result = rows(target, answer);
        let labels: Vec<(&str, &str)> = result
            .iter()
            .map(|(c, p, _, _)| (c.as_str(), p.as_str()))
            .collect();
        assert_eq!(
            labels,
            [
                ("Chart B", "chart-type"),
                ("Chart B", "title"),
                ("Chart A", "chart-type"),
            ]
        );
        assert!(!result[1].3);
    }
}
