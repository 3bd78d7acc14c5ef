//! # Inline Parsing
//!
//! Single-pass, cursor-based parsing of one span of inline markdown into a
//! tree of [`Node`](crate::node::Node)s.
//!
//! ## Architecture
//!
//! Inline parsing runs after block parsing, once per inline-eligible block,
//! against a shared read-only [`Document`](crate::document::Document).
//!
//! At every position the open constructs get the first chance to close, then
//! the document's ordered rule list is tried, and otherwise the character is
//! left in the pending literal run. Paired constructs (emphasis, links, host
//! tags) live on an explicit [`TagStack`](stack::TagStack); anything left open
//! at the end falls back to literal text.
//!
//! ## Modules
//!
//! - **`cursor`**: `Cursor` for character-by-character parsing with position tracking
//! - **`delimiter`**: flanking classification of `*`, `_` and `~` runs
//! - **`stack`**: open states, closing and flattening
//! - **`kinds`**: the rule families, each owning its delimiters
//! - **`syntax`**: the `InlineSyntax` rule enum and the ordered default tables
//! - **`parser`**: `parse_inline()` main entry point
//!
//! ## Raw Zone Precedence
//!
//! Code spans take precedence: `` `*not emphasis*` `` parses as a single code
//! element, not as text containing emphasis.

pub mod cursor;
pub mod delimiter;
pub mod kinds;
pub mod parser;
pub mod stack;
pub mod syntax;

pub use parser::parse_inline;
pub use syntax::{ExtensionSet, InlineSyntax};
