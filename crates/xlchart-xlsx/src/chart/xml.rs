//! Small namespace-agnostic helpers over `roxmltree` nodes. Chart parts mix
//! `c:`, `cx:`, `c15:` and `a:` namespaces; matching on local names keeps the
//! parsers readable and tolerant of producer prefix choices.

use roxmltree::Node;

pub fn child<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

pub fn descendant<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

pub fn val<'a>(node: Node<'a, 'a>) -> Option<&'a str> {
    node.attribute("val")
}

pub fn child_val<'a>(node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(val)
}

pub fn child_f64(node: Node<'_, '_>, name: &str) -> Option<f64> {
    child_val(node, name).and_then(|v| v.parse().ok())
}

pub fn child_i64(node: Node<'_, '_>, name: &str) -> Option<i64> {
    child_val(node, name).and_then(|v| v.parse().ok())
}

/// Boolean element in the `val`-attribute convention: an element present
/// without `val` means true; `0`/`false` mean false.
pub fn child_flag(node: Node<'_, '_>, name: &str) -> bool {
    match child(node, name) {
        Some(el) => !matches!(val(el), Some("0") | Some("false")),
        None => false,
    }
}

/// Concatenated text runs (`a:t` descendants) of a node, the way chart and
/// axis titles store their display text.
pub fn text_runs(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    for t in node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "t")
    {
        if let Some(text) = t.text() {
            out.push_str(text);
        }
    }
    out
}
