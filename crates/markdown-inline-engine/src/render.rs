//! Minimal HTML serialization of inline trees.
//!
//! Text leaves and attribute values are already escaped by the parser, so
//! both are written verbatim.

use crate::node::{Element, Node};

/// Renders `nodes` as an HTML fragment.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => write_element(out, element),
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }

    match &element.children {
        None => out.push_str(" />"),
        Some(children) => {
            out.push('>');
            write_nodes(out, children);
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}
