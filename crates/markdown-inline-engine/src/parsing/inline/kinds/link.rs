//! Links `[text](url "title")`, `[text][id]`, `[id][]`, `[id]` and their
//! image forms prefixed with `!`.

use crate::document::Document;
use crate::escape::{escape_attribute, quote_attribute};
use crate::node::{Element, Node, text_content};
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::{OpenRule, TagStack, TagState};
use crate::reference::Link;

pub const OPEN: &[u8] = b"[";
pub const IMAGE_OPEN: &[u8] = b"![";
pub const CLOSE: u8 = b']';

/// The closing bracket plus whatever destination follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEnd {
    pub len: usize,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `](url "title")`
    Inline { url: String, title: Option<String> },
    /// `][id]` with a non-empty id.
    Reference(String),
    /// `][]` or a bare `]`: the link text is the label.
    Shortcut,
}

/// Deepest `(` nesting a bare destination may have. Also caps how far past
/// an unclosed `](` a single scan reads.
const MAX_PAREN_DEPTH: usize = 32;

pub fn try_open(
    image: bool,
    cursor: &mut Cursor<'_>,
    stack: &mut TagStack,
    document: &Document,
) -> bool {
    let marker = if image { IMAGE_OPEN } else { OPEN };
    if !cursor.starts_with(marker) {
        return false;
    }
    if stack.depth() >= document.max_nesting() {
        log::trace!("nesting limit reached, bracket at {} left as text", cursor.pos);
        return false;
    }

    stack.flush(cursor);
    let start = cursor.pos;
    let rule = if image { OpenRule::Image } else { OpenRule::Link };
    stack.push(TagState::new(start, start + marker.len(), rule));
    cursor.consume(marker.len());
    true
}

/// Matches `]` and greedily the `[id]` or `(url "title")` group after it.
///
/// A group that does not parse leaves a bare `]`.
pub fn match_end(cursor: &Cursor<'_>) -> Option<LinkEnd> {
    if cursor.peek() != Some(CLOSE) {
        return None;
    }
    let rest = cursor.rest();
    let group = match rest.as_bytes().get(1) {
        Some(b'[') => reference_end(rest),
        Some(b'(') => inline_end(rest),
        _ => None,
    };
    Some(group.unwrap_or(LinkEnd {
        len: 1,
        target: LinkTarget::Shortcut,
    }))
}

/// `][id]`, where `rest` starts at the `]`.
fn reference_end(rest: &str) -> Option<LinkEnd> {
    let close = rest[2..].find(char::from(CLOSE))? + 2;
    let id = &rest[2..close];
    let target = if id.is_empty() {
        LinkTarget::Shortcut
    } else {
        LinkTarget::Reference(id.to_string())
    };
    Some(LinkEnd {
        len: close + 1,
        target,
    })
}

/// `](destination "title")`, where `rest` starts at the `]`.
fn inline_end(rest: &str) -> Option<LinkEnd> {
    let bytes = rest.as_bytes();
    let url_start = skip_whitespace(bytes, 2);
    let url_end = destination_end(bytes, url_start)?;

    let mut i = skip_whitespace(bytes, url_end);
    let mut title = None;
    if i > url_end {
        if let Some((text, end)) = title_at(rest, i) {
            title = Some(text.to_string());
            i = skip_whitespace(bytes, end);
        }
    }
    if bytes.get(i) != Some(&b')') {
        return None;
    }
    Some(LinkEnd {
        len: i + 1,
        target: LinkTarget::Inline {
            url: rest[url_start..url_end].to_string(),
            title,
        },
    })
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

/// End of a `<...>` destination (brackets included) or of a bare one with
/// balanced parentheses. A bare destination stops at whitespace, a control
/// character or the first unbalanced `)`.
fn destination_end(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) == Some(&b'<') {
        let mut i = start + 1;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'>' => return Some(i + 1),
                b'<' | b'\n' => return None,
                _ => i += 1,
            }
        }
        return None;
    }

    let mut depth = 0;
    let mut i = start;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'(' if depth == MAX_PAREN_DEPTH => return None,
            b'(' => depth += 1,
            b')' if depth == 0 => break,
            b')' => depth -= 1,
            _ if b.is_ascii_whitespace() || b.is_ascii_control() => break,
            _ => {}
        }
        i += 1;
    }
    (depth == 0).then_some(i)
}

/// A `"..."`, `'...'` or `(...)` title starting at `start`, with the
/// position just past it. A parenthesized title may not contain `(`.
fn title_at(rest: &str, start: usize) -> Option<(&str, usize)> {
    let (open, close) = match rest.as_bytes().get(start)? {
        b'"' => ('"', '"'),
        b'\'' => ('\'', '\''),
        b'(' => ('(', ')'),
        _ => return None,
    };
    let body = &rest[start + 1..];
    let len = body.find(|c: char| c == close || (open == '(' && c == '('))?;
    if !body[len..].starts_with(close) {
        return None;
    }
    Some((&body[..len], start + 1 + len + 1))
}

/// Resolves a closed bracket state into a link or image.
///
/// Hands the state back when nothing resolves so the caller can turn it into
/// literal text.
pub fn close(
    state: TagState,
    end: &LinkEnd,
    image: bool,
    stack: &mut TagStack,
    cursor: &mut Cursor<'_>,
    document: &Document,
) -> Result<(), TagState> {
    let source = cursor.s;
    let inner = &source[state.end..cursor.pos];

    let node = match resolve(&end.target, inner, document) {
        Some(link) => build(image, state.children, &link),
        None => {
            let resolver = if image {
                document.image_resolver()
            } else {
                document.link_resolver()
            };
            let Some(node) = resolver.and_then(|resolve| resolve(inner)) else {
                return Err(state);
            };
            log::trace!("fallback resolver handled {inner:?}");
            node
        }
    };

    stack.add_node(node);
    cursor.consume(end.len);
    Ok(())
}

fn resolve(target: &LinkTarget, inner: &str, document: &Document) -> Option<Link> {
    match target {
        LinkTarget::Inline { url, title } => {
            let url = url
                .strip_prefix('<')
                .and_then(|u| u.strip_suffix('>'))
                .unwrap_or(url);
            Some(Link::new(url, title.clone()))
        }
        LinkTarget::Reference(id) => document.references().get(id).cloned(),
        LinkTarget::Shortcut => document.references().get(inner).cloned(),
    }
}

fn build(image: bool, children: Vec<Node>, link: &Link) -> Node {
    let element = if image {
        Element::empty("img")
            .with_attribute("src", escape_attribute(&link.url))
            .with_attribute("alt", quote_attribute(&text_content(&children)))
    } else {
        Element::new("a", children).with_attribute("href", escape_attribute(&link.url))
    };
    let element = match link.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => element.with_attribute("title", escape_attribute(title)),
        None => element,
    };
    element.into()
}
