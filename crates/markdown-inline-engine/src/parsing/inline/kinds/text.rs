//! Rules that only produce text: literal pass-through patterns, character
//! substitutions, backslash escapes, hard line breaks and the plain-word
//! accelerator.

use regex::Regex;

use crate::document::Document;
use crate::node::{Element, Node};
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::TagStack;

/// Matches `pattern` and either leaves the match as literal text or replaces
/// it with `substitute`.
#[derive(Debug, Clone)]
pub struct TextSyntax {
    pattern: Regex,
    substitute: Option<&'static str>,
    /// Quick first-byte check before running the regex.
    start: Option<u8>,
}

impl TextSyntax {
    pub(crate) fn new(pattern: Regex, substitute: Option<&'static str>, start: Option<u8>) -> Self {
        Self {
            pattern,
            substitute,
            start,
        }
    }

    pub fn try_match(&self, cursor: &mut Cursor<'_>, stack: &mut TagStack) -> bool {
        if self.start.is_some_and(|b| cursor.peek() != Some(b)) {
            return false;
        }
        let Some(len) = self.pattern.find(cursor.rest()).map(|m| m.len()) else {
            return false;
        };
        if len == 0 {
            return false;
        }

        stack.flush(cursor);
        match self.substitute {
            Some(sub) => {
                stack.add_node(Node::text(sub));
                cursor.consume(len);
            }
            None => cursor.advance_by(len),
        }
        true
    }
}

/// Skips runs of plain words so the other rules are not tried at every
/// character.
///
/// Matches the longest prefix of `[ \tA-Za-z0-9]*[A-Za-z0-9]` that is
/// followed by whitespace. The `conservative` form only skips a single
/// `[A-Za-z0-9]+` word, leaving more positions open to host rules.
pub fn try_words(conservative: bool, cursor: &mut Cursor<'_>, stack: &mut TagStack) -> bool {
    let len = if conservative {
        word_len(cursor)
    } else {
        phrase_len(cursor)
    };
    let Some(len) = len else {
        return false;
    };
    stack.flush(cursor);
    cursor.advance_by(len);
    true
}

fn followed_by_whitespace(cursor: &Cursor<'_>, end: usize) -> bool {
    cursor.char_at(end).is_some_and(char::is_whitespace)
}

fn word_len(cursor: &Cursor<'_>) -> Option<usize> {
    let len = cursor
        .rest()
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    (len > 0 && followed_by_whitespace(cursor, cursor.pos + len)).then_some(len)
}

fn phrase_len(cursor: &Cursor<'_>) -> Option<usize> {
    let rest = cursor.rest().as_bytes();
    let span = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b' ' || **b == b'\t')
        .count();
    (1..=span)
        .rev()
        .find(|&end| rest[end - 1].is_ascii_alphanumeric() && followed_by_whitespace(cursor, cursor.pos + end))
}

/// `\` followed by ASCII punctuation.
pub fn try_escape(cursor: &mut Cursor<'_>, stack: &mut TagStack, document: &Document) -> bool {
    if cursor.peek() != Some(b'\\') {
        return false;
    }
    let Some(escaped) = cursor.char_at(cursor.pos + 1).filter(char::is_ascii_punctuation) else {
        return false;
    };

    let text = match escaped {
        '"' if document.encode_html() => "&quot;".to_string(),
        '<' if document.encode_html() => "&lt;".to_string(),
        '>' if document.encode_html() => "&gt;".to_string(),
        '&' if document.encode_html() => "&amp;".to_string(),
        c => c.to_string(),
    };

    stack.flush(cursor);
    stack.add_node(Node::Text(text));
    cursor.consume(2);
    true
}

/// A backslash or two or more spaces before a newline.
pub fn try_line_break(cursor: &mut Cursor<'_>, stack: &mut TagStack) -> bool {
    let rest = cursor.rest().as_bytes();
    let len = match rest.first() {
        Some(b'\\') => 1,
        Some(b' ') => rest.iter().take_while(|&&b| b == b' ').count(),
        _ => return false,
    };
    let is_break = rest.get(len) == Some(&b'\n') && (rest[0] == b'\\' || len >= 2);
    if !is_break {
        return false;
    }

    stack.flush(cursor);
    stack.add_node(Element::empty("br").into());
    cursor.consume(len + 1);
    true
}
