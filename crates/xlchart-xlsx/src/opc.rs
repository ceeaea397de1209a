//! OPC part-name arithmetic and relationship parsing.

use roxmltree::Document;

use crate::XlsxError;

pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub target: String,
}

/// Parse a `_rels/*.rels` part into its relationship list. The relationship
/// type is not kept; targets are resolved against the source part instead.
pub fn parse_relationships(xml: &str, part: &str) -> Result<Vec<Relationship>, XlsxError> {
    let doc = Document::parse(xml).map_err(|source| XlsxError::Xml {
        part: part.to_string(),
        source,
    })?;

    let mut rels = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
    {
        let Some(id) = node.attribute("Id") else {
            continue;
        };
        rels.push(Relationship {
            id: id.to_string(),
            target: node.attribute("Target").unwrap_or_default().to_string(),
        });
    }
    Ok(rels)
}

/// The `.rels` part describing relationships of `part`.
pub fn rels_for_part(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolve a relationship target against its source part, yielding a
/// normalized part name. Fragments are not part of OPC names and are
/// stripped.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    let target = target.split('#').next().unwrap_or(target);
    if target.is_empty() {
        return normalize(source_part);
    }
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute);
    }
    let base = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    normalize(&format!("{base}/{target}"))
}

fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
