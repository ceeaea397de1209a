//! Parser for ChartEx (`cx:chartSpace`) parts, which hold the modern chart
//! types: histogram, box & whisker, waterfall, treemap, sunburst, funnel.
//!
//! ChartEx series carry a `layoutId` instead of per-type plot nodes, and
//! histogram binning lives on the series. Series data is indirected through
//! `cx:chartData` blocks referenced by `dataId`.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use xlchart_extract::{AxisScale, AxisTitle, BinGroup, ChartTitle};
use xlchart_model::{AxisType, ChartType, AXIS_GROUP_PRIMARY};

use super::xml::{child, descendant, text_runs};
use super::{CachedSeries, XlsxAxis, XlsxChart, XlsxGroup, XlsxSeries};

pub(super) fn parse(name: &str, doc: &Document<'_>) -> XlsxChart {
    let root = doc.root_element();
    let chart_node = child(root, "chart");

    let series_nodes: Vec<Node<'_, '_>> = root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "series")
        .collect();
    let chart_type = detect_type(&series_nodes);

    let title = chart_node
        .and_then(|c| child(c, "title"))
        .map(|t| ChartTitle {
            text: text_runs(t),
            overlay: false,
        });

    let legend_position = chart_node
        .and_then(|c| child(c, "legend"))
        .map(|legend| legend_pos_code(legend.attribute("pos").unwrap_or("r")))
        .unwrap_or(0);

    let chart_data = parse_chart_data(root);

    let groups = series_nodes
        .iter()
        .enumerate()
        .map(|(position, ser)| parse_series_group(*ser, chart_type, position, &chart_data))
        .collect();

    let axes = root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "axis")
        .map(parse_axis)
        .collect();

    XlsxChart {
        name: name.to_string(),
        chart_type,
        title,
        legend_position,
        axes,
        groups,
    }
}

/// Map ChartEx series layouts to a chart-type code. Histograms share the
/// `clusteredColumn` layout with pareto charts; the presence of a binning
/// block marks them, and a pareto line series marks pareto.
fn detect_type(series_nodes: &[Node<'_, '_>]) -> ChartType {
    fn layout<'a>(node: Node<'a, 'a>) -> &'a str {
        node.attribute("layoutId").unwrap_or("")
    }

    if series_nodes.iter().any(|n| layout(*n) == "boxWhisker") {
        return ChartType::BOX_WHISKER;
    }
    if series_nodes.iter().any(|n| child(*n, "binning").is_some()) {
        if series_nodes.iter().any(|n| layout(*n) == "paretoLine") {
            return ChartType::PARETO;
        }
        return ChartType::HISTOGRAM;
    }
    match series_nodes.first().copied().map(layout).unwrap_or("") {
        "waterfall" => ChartType::WATERFALL,
        "treemap" => ChartType::TREEMAP,
        "sunburst" => ChartType::SUNBURST,
        "funnel" => ChartType::FUNNEL,
        _ => ChartType(0),
    }
}

fn legend_pos_code(pos: &str) -> i64 {
    match pos {
        "b" => -4107,
        "l" => -4131,
        "r" => -4152,
        "t" => -4160,
        _ => -4152,
    }
}

#[derive(Debug, Clone, Default)]
struct ChartData {
    categories: Vec<String>,
    values: Vec<f64>,
    category_formula: Option<String>,
    value_formula: Option<String>,
}

/// Cached values and source formulas per `cx:data` id.
fn parse_chart_data(root: Node<'_, '_>) -> HashMap<i64, ChartData> {
    let mut out = HashMap::new();
    let Some(chart_data) = descendant(root, "chartData") else {
        return out;
    };
    for data in chart_data
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "data")
    {
        let Some(id) = data.attribute("id").and_then(|v| v.parse::<i64>().ok()) else {
            continue;
        };
        let categories = dimension_points(data, "strDim");
        let values = dimension_points(data, "numDim")
            .iter()
            .filter_map(|v| v.parse().ok())
            .collect();
        out.insert(
            id,
            ChartData {
                categories,
                values,
                category_formula: dimension_formula(data, "strDim"),
                value_formula: dimension_formula(data, "numDim"),
            },
        );
    }
    out
}

fn dimension_points(data: Node<'_, '_>, dim_name: &str) -> Vec<String> {
    let Some(dim) = child(data, dim_name) else {
        return Vec::new();
    };
    // ChartEx points hold their text directly: <cx:pt idx="0">12.5</cx:pt>.
    dim.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "pt")
        .filter_map(|pt| pt.text())
        .map(str::to_string)
        .collect()
}

fn dimension_formula(data: Node<'_, '_>, dim_name: &str) -> Option<String> {
    child(data, dim_name)
        .and_then(|dim| child(dim, "f"))
        .and_then(|f| f.text())
        .map(str::to_string)
}

/// Each ChartEx series is its own chart group; histogram binning rides on
/// the group.
fn parse_series_group(
    ser: Node<'_, '_>,
    chart_type: ChartType,
    position: usize,
    chart_data: &HashMap<i64, ChartData>,
) -> XlsxGroup {
    let data = child(ser, "dataId")
        .and_then(|n| n.attribute("val"))
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|id| chart_data.get(&id))
        .cloned()
        .unwrap_or_default();

    let name_formula = child(ser, "tx")
        .and_then(|tx| descendant(tx, "f"))
        .and_then(|f| f.text())
        .map(str::to_string);
    let name = child(ser, "tx")
        .and_then(|tx| descendant(tx, "v"))
        .and_then(|v| v.text())
        .map(str::to_string)
        .or_else(|| name_formula.clone())
        .unwrap_or_default();

    let formula = format!(
        "=SERIES({},{},{},{})",
        name_formula.unwrap_or_default(),
        data.category_formula.clone().unwrap_or_default(),
        data.value_formula.clone().unwrap_or_default(),
        position + 1
    );

    XlsxGroup {
        series: vec![XlsxSeries {
            chart_type,
            formula,
            name: name.clone(),
            data_labels: None,
            error_bars_end_style: None,
            trendlines: Vec::new(),
            axis_group: AXIS_GROUP_PRIMARY,
            cached: CachedSeries {
                name,
                categories: data.categories,
                xs: Vec::new(),
                ys: data.values,
            },
        }],
        overlap: None,
        gap_width: None,
        bins: child(ser, "binning").map(parse_binning),
    }
}

fn parse_binning(binning: Node<'_, '_>) -> BinGroup {
    let bin_width = child(binning, "binSize")
        .and_then(|n| n.attribute("val"))
        .and_then(|v| v.parse::<f64>().ok());
    let bins_count = child(binning, "binCount")
        .and_then(|n| n.attribute("val"))
        .and_then(|v| v.parse::<i64>().ok());

    let bins_type = if bin_width.is_some() {
        "binWidth"
    } else if bins_count.is_some() {
        "binCount"
    } else {
        "automatic"
    };

    // Overflow/underflow bins carry their threshold as an attribute; absent
    // means the bin is disabled.
    let overflow = binning.attribute("overflow").and_then(|v| v.parse().ok());
    let underflow = binning.attribute("underflow").and_then(|v| v.parse().ok());

    BinGroup {
        bins_type: bins_type.to_string(),
        bin_width,
        bins_count,
        overflow_enabled: overflow.is_some(),
        overflow,
        underflow_enabled: underflow.is_some(),
        underflow,
    }
}

fn parse_axis(node: Node<'_, '_>) -> XlsxAxis {
    let axis_type = if child(node, "valScaling").is_some() {
        AxisType::VALUE
    } else {
        AxisType::CATEGORY
    };
    let mut axis = XlsxAxis::new(axis_type, AXIS_GROUP_PRIMARY);

    if let Some(scaling) = child(node, "valScaling") {
        let min = scaling.attribute("min").and_then(|v| v.parse().ok());
        let max = scaling.attribute("max").and_then(|v| v.parse().ok());
        axis.scale = AxisScale {
            min,
            min_auto: min.is_none(),
            max,
            max_auto: max.is_none(),
        };
    }

    if let Some(title_node) = child(node, "title") {
        axis.title = Some(AxisTitle {
            caption: text_runs(title_node),
            orientation: None,
        });
    }

    axis.tick_label_format = child(node, "numFmt")
        .and_then(|n| n.attribute("formatCode"))
        .map(str::to_string);

    axis
}
