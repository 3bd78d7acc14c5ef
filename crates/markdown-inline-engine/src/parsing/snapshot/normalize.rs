use std::fmt::Write;

use crate::node::Node;

/// Renders a tree as an indented outline, one node per line, for snapshot
/// assertions.
///
/// ```text
/// em
///   "a "
///   a href="/x"
///     "b"
/// ```
pub fn normalize(nodes: &[Node]) -> String {
    let mut out = String::new();
    outline(&mut out, nodes, 0);
    out.truncate(out.trim_end().len());
    out
}

fn outline(out: &mut String, nodes: &[Node], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            Node::Text(text) => {
                let _ = writeln!(out, "{indent}{text:?}");
            }
            Node::Element(element) => {
                let _ = write!(out, "{indent}{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}={value:?}");
                }
                if element.is_empty() {
                    out.push_str(" /");
                }
                out.push('\n');
                if let Some(children) = &element.children {
                    outline(out, children, depth + 1);
                }
            }
        }
    }
}
