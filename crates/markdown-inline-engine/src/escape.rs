//! HTML and URI escaping helpers shared by the inline rules.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters a full-URI encoder replaces. Reserved characters and `%` are
/// kept so existing escapes survive.
const URI_FULL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escapes `&`, `<` and `>` for use in element content.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escapes a value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Percent-encodes a URL, leaving its structure intact.
pub fn encode_uri(url: &str) -> String {
    utf8_percent_encode(url, URI_FULL).to_string()
}

/// Escapes only the double quote, for values built from already-encoded text.
pub(crate) fn quote_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}
