//! Locates chart parts through the relationship graph.
//!
//! Embedded charts: `xl/workbook.xml` -> worksheet -> `<drawing r:id>` ->
//! drawing part -> `<xdr:graphicFrame>` -> `<c:chart r:id>` -> chart part.
//! Chart sheets: the chartsheet's drawing holds a single chart frame.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::opc::{parse_relationships, rels_for_part, resolve_target, Relationship, REL_NS};
use crate::package::WorkbookPackage;
use crate::XlsxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    pub sheet_name: String,
    /// Drawing object name (`Graph 1`, ...); `None` for chart sheets.
    pub object_name: Option<String>,
    /// Part name of the chart XML (`xl/charts/chart1.xml` or a ChartEx part).
    pub part: String,
}

impl ChartRef {
    pub fn key(&self) -> &str {
        self.object_name.as_deref().unwrap_or(&self.sheet_name)
    }
}

/// Enumerate every chart of the workbook: embedded charts in workbook sheet
/// order first, chart sheets after, mirroring how a host enumerates
/// worksheets before standalone charts.
pub fn discover_charts(package: &WorkbookPackage) -> Result<Vec<ChartRef>, XlsxError> {
    let workbook_part = "xl/workbook.xml";
    let Some(workbook_xml) = package.text(workbook_part)? else {
        return Err(XlsxError::MissingPart(workbook_part.to_string()));
    };
    let workbook_doc = parse_doc(workbook_xml, workbook_part)?;
    let workbook_rels = rel_map(package, workbook_part)?;

    let mut embedded = Vec::new();
    let mut chart_sheets = Vec::new();

    for sheet in workbook_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "sheet")
    {
        let Some(sheet_name) = sheet.attribute("name") else {
            continue;
        };
        let Some(rid) = rel_id(sheet) else {
            continue;
        };
        let Some(rel) = workbook_rels.get(rid) else {
            continue;
        };
        let sheet_part = resolve_target(workbook_part, &rel.target);
        let is_chart_sheet = sheet_part.contains("chartsheets/");

        let Some(sheet_xml) = package.text(&sheet_part)? else {
            continue;
        };
        let sheet_doc = parse_doc(sheet_xml, &sheet_part)?;
        let sheet_rels = rel_map(package, &sheet_part)?;

        // Both worksheet and chartsheet reference their drawing part the
        // same way.
        for drawing_node in sheet_doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "drawing")
        {
            let Some(rid) = rel_id(drawing_node) else {
                continue;
            };
            let Some(rel) = sheet_rels.get(rid) else {
                continue;
            };
            let drawing_part = resolve_target(&sheet_part, &rel.target);
            let charts = charts_in_drawing(package, &drawing_part)?;
            for (object_name, chart_part) in charts {
                if is_chart_sheet {
                    chart_sheets.push(ChartRef {
                        sheet_name: sheet_name.to_string(),
                        object_name: None,
                        part: chart_part,
                    });
                } else {
                    embedded.push(ChartRef {
                        sheet_name: sheet_name.to_string(),
                        object_name: Some(object_name),
                        part: chart_part,
                    });
                }
            }
        }
    }

    embedded.extend(chart_sheets);
    Ok(embedded)
}

/// Chart references in a drawing part: `(object name, chart part)` pairs in
/// document order.
fn charts_in_drawing(
    package: &WorkbookPackage,
    drawing_part: &str,
) -> Result<Vec<(String, String)>, XlsxError> {
    let Some(drawing_xml) = package.text(drawing_part)? else {
        return Ok(Vec::new());
    };
    let drawing_doc = parse_doc(drawing_xml, drawing_part)?;
    let drawing_rels = rel_map(package, drawing_part)?;

    let mut out = Vec::new();
    for frame in drawing_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "graphicFrame")
    {
        let object_name = frame
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "cNvPr")
            .and_then(|n| n.attribute("name"))
            .unwrap_or_default()
            .to_string();
        let Some(chart_node) = frame
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "chart")
        else {
            continue;
        };
        let Some(rid) = rel_id(chart_node) else {
            continue;
        };
        let Some(rel) = drawing_rels.get(rid) else {
            continue;
        };
        out.push((object_name, resolve_target(drawing_part, &rel.target)));
    }
    Ok(out)
}

fn rel_map(
    package: &WorkbookPackage,
    part: &str,
) -> Result<HashMap<String, Relationship>, XlsxError> {
    let rels_part = rels_for_part(part);
    let Some(xml) = package.text(&rels_part)? else {
        return Ok(HashMap::new());
    };
    Ok(parse_relationships(xml, &rels_part)?
        .into_iter()
        .map(|rel| (rel.id.clone(), rel))
        .collect())
}

fn rel_id<'a>(node: Node<'a, 'a>) -> Option<&'a str> {
    node.attribute((REL_NS, "id"))
        .or_else(|| node.attribute("r:id"))
        .or_else(|| node.attribute("id"))
}

fn parse_doc<'a>(xml: &'a str, part: &str) -> Result<Document<'a>, XlsxError> {
    Document::parse(xml).map_err(|source| XlsxError::Xml {
        part: part.to_string(),
        source,
    })
}
