//! The read-only inputs an inline parse consumes: the reference table, the
//! composed rule list, fallback resolvers and output options.

use std::fmt;
use std::sync::Arc;

use crate::node::Node;
use crate::parsing::inline::{
    self,
    syntax::{ExtensionSet, InlineSyntax, compose},
};
use crate::reference::ReferenceLinks;

/// Maps the raw text between brackets to a node when no link resolves.
pub type Resolver = Arc<dyn Fn(&str) -> Option<Node> + Send + Sync>;

pub const DEFAULT_MAX_NESTING: usize = 128;

/// Host configuration for inline parsing.
#[derive(Clone)]
pub struct InlineOptions {
    /// Rules tried before all built-in rules, in order.
    pub syntaxes: Vec<InlineSyntax>,
    pub extensions: ExtensionSet,
    /// Called with the raw inner text of an unresolved `[...]`.
    pub link_resolver: Option<Resolver>,
    /// Called with the raw inner text of an unresolved `![...]`.
    pub image_resolver: Option<Resolver>,
    /// Replace `&`, `<` and `>` in text with entities.
    pub encode_html: bool,
    /// Maximum number of simultaneously open constructs. Openers past the
    /// limit are kept as literal text.
    pub max_nesting: usize,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            syntaxes: vec![],
            extensions: ExtensionSet::common_mark(),
            link_resolver: None,
            image_resolver: None,
            encode_html: true,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl fmt::Debug for InlineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineOptions")
            .field("syntaxes", &self.syntaxes)
            .field("extensions", &self.extensions)
            .field("link_resolver", &self.link_resolver.is_some())
            .field("image_resolver", &self.image_resolver.is_some())
            .field("encode_html", &self.encode_html)
            .field("max_nesting", &self.max_nesting)
            .finish()
    }
}

/// Everything inline parsing reads but never mutates.
///
/// Built once per document after block parsing has collected the reference
/// definitions; any number of spans may then be parsed against it, from any
/// thread.
pub struct Document {
    references: ReferenceLinks,
    syntaxes: Vec<InlineSyntax>,
    link_resolver: Option<Resolver>,
    image_resolver: Option<Resolver>,
    encode_html: bool,
    max_nesting: usize,
}

impl Document {
    pub fn new(references: ReferenceLinks, options: InlineOptions) -> Self {
        let syntaxes = compose(&options.syntaxes, options.extensions, options.encode_html);
        log::debug!(
            "inline document: {} references, {} rules ({} custom)",
            references.len(),
            syntaxes.len(),
            options.syntaxes.len()
        );
        Self {
            references,
            syntaxes,
            link_resolver: options.link_resolver,
            image_resolver: options.image_resolver,
            encode_html: options.encode_html,
            max_nesting: options.max_nesting,
        }
    }

    pub fn references(&self) -> &ReferenceLinks {
        &self.references
    }

    /// The composed, ordered rule list.
    pub fn syntaxes(&self) -> &[InlineSyntax] {
        &self.syntaxes
    }

    pub fn link_resolver(&self) -> Option<&Resolver> {
        self.link_resolver.as_ref()
    }

    pub fn image_resolver(&self) -> Option<&Resolver> {
        self.image_resolver.as_ref()
    }

    pub fn encode_html(&self) -> bool {
        self.encode_html
    }

    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Parses one span of inline markdown.
    pub fn parse_inline(&self, source: &str) -> Vec<Node> {
        inline::parse_inline(source, self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(ReferenceLinks::new(), InlineOptions::default())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("references", &self.references)
            .field("syntaxes", &self.syntaxes.len())
            .field("encode_html", &self.encode_html)
            .field("max_nesting", &self.max_nesting)
            .finish_non_exhaustive()
    }
}
