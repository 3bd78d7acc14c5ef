//! The ordered inline rule set.
//!
//! Rules are tried in order at every cursor position and the first match
//! wins, so the order of the tables below is part of the grammar. The
//! default tables are built once per process and shared; a [`Document`]
//! composes its own ordered list from them plus the host's rules.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::document::Document;
use crate::error::SyntaxError;

use super::cursor::Cursor;
use super::kinds::{
    CustomSyntax, PairedSyntax, TextSyntax, autolink, code_span,
    emphasis::{self, ASTERISK, TILDE, UNDERSCORE},
    link, text,
};
use super::stack::TagStack;

/// Compiles `pattern` so it only matches at the start of the haystack.
pub(crate) fn anchored(pattern: &str) -> Result<Regex, SyntaxError> {
    Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| SyntaxError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn builtin(pattern: &str) -> Regex {
    anchored(pattern).expect("Invalid built-in inline pattern")
}

/// One inline rule.
#[derive(Debug, Clone)]
pub enum InlineSyntax {
    /// Literal pass-through or substitution.
    Text(TextSyntax),
    /// The plain-word accelerator.
    Words { conservative: bool },
    Escape,
    LineBreak,
    /// `<scheme:...>`
    Autolink,
    /// `<user@host>`
    EmailAutolink,
    /// Bare `www.` / `https://` URLs.
    AutolinkExtension,
    CodeSpan,
    /// A delimiter-run opener: `*`, `_` or `~`.
    Delimiter(u8),
    Link,
    Image,
    Paired(Arc<PairedSyntax>),
    Custom(CustomSyntax),
}

impl InlineSyntax {
    /// A host rule that replaces whatever `pattern` matches with a node.
    pub fn custom<F>(pattern: &str, handler: F) -> Result<Self, SyntaxError>
    where
        F: Fn(&regex::Captures<'_>) -> Option<crate::node::Node> + Send + Sync + 'static,
    {
        Ok(InlineSyntax::Custom(CustomSyntax::new(pattern, handler)?))
    }

    /// A host rule wrapping everything between `start` and `end` in `tag`.
    pub fn paired(start: &str, end: &str, tag: impl Into<String>) -> Result<Self, SyntaxError> {
        Ok(InlineSyntax::Paired(Arc::new(PairedSyntax::new(
            start, end, tag,
        )?)))
    }

    /// Text matching `pattern` is kept verbatim and skipped by all later rules.
    pub fn literal(pattern: &str) -> Result<Self, SyntaxError> {
        Ok(InlineSyntax::Text(TextSyntax::new(anchored(pattern)?, None, None)))
    }

    /// Tries this rule at the cursor. Returns true if it matched, in which
    /// case the cursor has moved.
    pub fn try_match(
        &self,
        cursor: &mut Cursor<'_>,
        stack: &mut TagStack,
        document: &Document,
    ) -> bool {
        match self {
            InlineSyntax::Text(syntax) => syntax.try_match(cursor, stack),
            InlineSyntax::Words { conservative } => text::try_words(*conservative, cursor, stack),
            InlineSyntax::Escape => text::try_escape(cursor, stack, document),
            InlineSyntax::LineBreak => text::try_line_break(cursor, stack),
            InlineSyntax::Autolink => autolink::try_uri(cursor, stack, document),
            InlineSyntax::EmailAutolink => autolink::try_email(cursor, stack, document),
            InlineSyntax::AutolinkExtension => autolink::try_bare(cursor, stack, document),
            InlineSyntax::CodeSpan => code_span::try_parse(cursor, stack, document),
            InlineSyntax::Delimiter(marker) => emphasis::try_open(*marker, cursor, stack, document),
            InlineSyntax::Link => link::try_open(false, cursor, stack, document),
            InlineSyntax::Image => link::try_open(true, cursor, stack, document),
            InlineSyntax::Paired(syntax) => syntax.try_open(cursor, stack, document),
            InlineSyntax::Custom(syntax) => syntax.try_match(cursor, stack),
        }
    }
}

/// Rules tried after the accelerator, links and images.
pub fn default_syntaxes() -> &'static [InlineSyntax] {
    static DEFAULTS: OnceLock<Vec<InlineSyntax>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        vec![
            InlineSyntax::EmailAutolink,
            InlineSyntax::Autolink,
            InlineSyntax::LineBreak,
            InlineSyntax::Escape,
            // A lone `*` or `_` between spaces is just text.
            InlineSyntax::Text(TextSyntax::new(builtin(r" \* "), None, Some(b' '))),
            InlineSyntax::Text(TextSyntax::new(builtin(r" _ "), None, Some(b' '))),
            InlineSyntax::Delimiter(ASTERISK),
            InlineSyntax::Delimiter(UNDERSCORE),
            InlineSyntax::CodeSpan,
        ]
    })
}

/// Rules that make the remaining text HTML-safe. Tried last.
pub fn html_syntaxes() -> &'static [InlineSyntax] {
    static HTML: OnceLock<Vec<InlineSyntax>> = OnceLock::new();
    HTML.get_or_init(|| {
        vec![
            // Already-encoded entities stay as they are, so `&amp;` does not
            // become `&amp;amp;`.
            InlineSyntax::Text(TextSyntax::new(builtin(r"&[#a-zA-Z0-9]*;"), None, Some(b'&'))),
            InlineSyntax::Text(TextSyntax::new(builtin("&"), Some("&amp;"), Some(b'&'))),
            InlineSyntax::Text(TextSyntax::new(builtin("<"), Some("&lt;"), Some(b'<'))),
            InlineSyntax::Text(TextSyntax::new(builtin(">"), Some("&gt;"), Some(b'>'))),
        ]
    })
}

/// Raw inline HTML tags, passed through untouched.
fn inline_html_syntax() -> InlineSyntax {
    static HTML_TAG: OnceLock<InlineSyntax> = OnceLock::new();
    HTML_TAG
        .get_or_init(|| {
            InlineSyntax::Text(TextSyntax::new(
                builtin(r"<[/!?]?[A-Za-z][A-Za-z0-9-]*(?:\s[^>]*)?>"),
                None,
                Some(b'<'),
            ))
        })
        .clone()
}

/// Optional rule families that are not part of core CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtensionSet {
    /// `~~struck~~` → `del`.
    pub strikethrough: bool,
    /// Bare `www.` and `https://` URLs become links.
    pub autolink: bool,
    /// Raw inline HTML tags pass through unescaped.
    pub inline_html: bool,
}

impl ExtensionSet {
    pub const fn none() -> Self {
        Self {
            strikethrough: false,
            autolink: false,
            inline_html: false,
        }
    }

    pub const fn common_mark() -> Self {
        Self {
            strikethrough: false,
            autolink: false,
            inline_html: true,
        }
    }

    pub const fn github_flavored() -> Self {
        Self {
            strikethrough: true,
            autolink: true,
            inline_html: true,
        }
    }

    /// The rules these extensions contribute, in priority order.
    pub fn syntaxes(&self) -> Vec<InlineSyntax> {
        let mut syntaxes = vec![];
        if self.inline_html {
            syntaxes.push(inline_html_syntax());
        }
        if self.strikethrough {
            syntaxes.push(InlineSyntax::Delimiter(TILDE));
        }
        if self.autolink {
            syntaxes.push(InlineSyntax::AutolinkExtension);
        }
        syntaxes
    }
}

/// Builds the ordered rule list for one document configuration.
///
/// Host rules come first, then extension rules, the word accelerator, links
/// and images, the defaults, and finally the HTML-encoding rules.
pub fn compose(
    custom: &[InlineSyntax],
    extensions: ExtensionSet,
    encode_html: bool,
) -> Vec<InlineSyntax> {
    let mut syntaxes = custom.to_vec();
    syntaxes.extend(extensions.syntaxes());
    syntaxes.push(InlineSyntax::Words {
        conservative: !custom.is_empty(),
    });
    syntaxes.push(InlineSyntax::Link);
    syntaxes.push(InlineSyntax::Image);
    syntaxes.extend(default_syntaxes().iter().cloned());
    if encode_html {
        syntaxes.extend(html_syntaxes().iter().cloned());
    }
    syntaxes
}
