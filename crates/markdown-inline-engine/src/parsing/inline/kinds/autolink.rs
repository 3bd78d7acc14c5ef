//! Autolinks: `<scheme:...>`, `<user@host>` and, as an extension, bare
//! `http://`, `https://`, `ftp://` and `www.` URLs.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::Document;
use crate::escape::{encode_uri, escape_attribute, escape_html};
use crate::node::{Element, Node};
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::TagStack;

/// Characters that may precede a bare URL.
const BARE_URL_PRECEDERS: &[char] = &['*', '_', '~', '(', '>'];

/// Trailing characters never considered part of a bare URL.
const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.', ',', ':', '*', '_', '~'];

fn uri_pattern() -> &'static Regex {
    static URI: OnceLock<Regex> = OnceLock::new();
    URI.get_or_init(|| {
        Regex::new(r"\A<(([a-zA-Z][a-zA-Z\-\+\.]+):(?://)?[^\s>]*)>").expect("Invalid autolink regex")
    })
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(concat!(
            r"\A<([a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*)>",
        ))
        .expect("Invalid email autolink regex")
    })
}

fn bare_url_pattern() -> &'static Regex {
    static BARE: OnceLock<Regex> = OnceLock::new();
    BARE.get_or_init(|| {
        Regex::new(r"\A(?:(?:https?|ftp)://|www\.)[\w\-][\w\-.]+[^\s<]*")
            .expect("Invalid bare URL regex")
    })
}

fn entity_suffix_pattern() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| Regex::new(r"&[a-zA-Z0-9]+;\z").expect("Invalid entity regex"))
}

fn anchor(text: &str, href: &str, document: &Document) -> Node {
    let text = if document.encode_html() {
        escape_html(text)
    } else {
        text.to_string()
    };
    Element::text("a", text)
        .with_attribute("href", escape_attribute(&encode_uri(href)))
        .into()
}

/// `<scheme:rest>`
pub fn try_uri(cursor: &mut Cursor<'_>, stack: &mut TagStack, document: &Document) -> bool {
    if cursor.peek() != Some(b'<') {
        return false;
    }
    let Some(caps) = uri_pattern().captures(cursor.rest()) else {
        return false;
    };
    let (len, url) = (caps[0].len(), &caps[1]);

    stack.flush(cursor);
    stack.add_node(anchor(url, url, document));
    cursor.consume(len);
    true
}

/// `<local@domain>`
pub fn try_email(cursor: &mut Cursor<'_>, stack: &mut TagStack, document: &Document) -> bool {
    if cursor.peek() != Some(b'<') {
        return false;
    }
    let Some(caps) = email_pattern().captures(cursor.rest()) else {
        return false;
    };
    let (len, address) = (caps[0].len(), &caps[1]);

    stack.flush(cursor);
    stack.add_node(anchor(address, &format!("mailto:{address}"), document));
    cursor.consume(len);
    true
}

/// Trims a bare URL candidate to the part that belongs to the link.
///
/// Returns `None` when the candidate is really a `<...>` autolink.
fn trim_bare_url(candidate: &str, preceding: Option<char>) -> Option<&str> {
    let mut url = candidate;

    if let Some(stripped) = url.strip_suffix('>') {
        if preceding == Some('<') {
            return None;
        }
        url = stripped;
    }

    // An unbalanced `)` and trailing punctuation may hide each other, as in
    // `(see www.example.com).`, so strip both until neither applies.
    loop {
        let mut trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        if trimmed.ends_with(')') && trimmed.matches(')').count() > trimmed.matches('(').count() {
            trimmed = &trimmed[..trimmed.len() - 1];
        }
        if trimmed.len() == url.len() {
            break;
        }
        url = trimmed;
    }

    if url.ends_with(';') {
        if let Some(entity) = entity_suffix_pattern().find(url) {
            url = &url[..entity.start()];
        }
    }

    Some(url)
}

/// Bare `www.example.com` and `https://example.com` URLs.
pub fn try_bare(cursor: &mut Cursor<'_>, stack: &mut TagStack, document: &Document) -> bool {
    let preceding = cursor.char_before(cursor.pos);
    let at_boundary = preceding.is_none_or(|c| c.is_whitespace() || BARE_URL_PRECEDERS.contains(&c));
    if !at_boundary {
        return false;
    }
    let Some(candidate) = bare_url_pattern().find(cursor.rest()) else {
        return false;
    };
    let Some(url) = trim_bare_url(candidate.as_str(), preceding) else {
        return false;
    };
    if url.is_empty() {
        return false;
    }

    let href = if url.starts_with("www.") {
        format!("http://{url}")
    } else {
        url.to_string()
    };

    stack.flush(cursor);
    stack.add_node(anchor(url, &href, document));
    cursor.consume(url.len());
    true
}
