use crate::node::Node;

/// Asserts the structural guarantees of a parsed inline tree: no empty text
/// leaves and no two text leaves next to each other, at any depth.
pub fn check(nodes: &[Node]) {
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => {
                assert!(!text.is_empty(), "empty text node at index {i}");
                assert!(
                    !matches!(nodes.get(i + 1), Some(Node::Text(_))),
                    "adjacent text nodes at index {i}: {:?} / {:?}",
                    node,
                    nodes.get(i + 1)
                );
            }
            Node::Element(element) => {
                if let Some(children) = &element.children {
                    check(children);
                }
            }
        }
    }
}
