pub mod document;
pub mod error;
pub mod escape;
pub mod node;
pub mod parsing;
pub mod reference;
pub mod render;

// Re-export key types for easier usage
pub use document::{Document, InlineOptions, Resolver};
pub use error::SyntaxError;
pub use node::{Element, Node};
pub use parsing::{ExtensionSet, InlineSyntax, parse_inline};
pub use reference::{Link, ReferenceDefinition, ReferenceLinks, normalize_label};
pub use render::to_html;
