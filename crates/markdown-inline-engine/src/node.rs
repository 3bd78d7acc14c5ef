use std::collections::BTreeMap;

/// A node in the inline tree produced by the parser.
///
/// Text leaves hold output-ready text: when HTML encoding is enabled the
/// special characters have already been replaced by entities, so renderers
/// must emit them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    Text(String),
    /// A formatting element such as `em`, `a` or `code`.
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// `None` for self-closing elements (`br`, `img`).
    pub children: Option<Vec<Node>>,
}

impl Element {
    /// Creates an element wrapping `children`.
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Some(children),
        }
    }

    /// Creates a self-closing element.
    pub fn empty(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: None,
        }
    }

    /// Creates an element with a single text child.
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag, vec![Node::Text(text.into())])
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_none()
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => text_content(element.children.as_deref().unwrap_or(&[])),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Concatenated text content of a node sequence.
pub fn text_content(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text_content).collect()
}

/// Appends `node` to `nodes`, merging it into a trailing text leaf when both
/// are text. Empty text is dropped.
pub(crate) fn push_node(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(text) => push_text(nodes, &text),
        element => nodes.push(element),
    }
}

pub(crate) fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}
