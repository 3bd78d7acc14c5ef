//! # Inline Kinds
//!
//! One module per family of inline rules. Each module owns its delimiter
//! constants and the matching logic for its constructs; the parser never
//! hardcodes `[` or `` ` `` itself.
//!
//! - **`text`**: literal pass-through, substitutions, escapes, line breaks,
//!   the plain-word accelerator
//! - **`emphasis`**: `*`/`_` emphasis and `~` strikethrough runs
//! - **`link`**: `[...]` links and `![...]` images
//! - **`code_span`**: backtick code spans (raw zones)
//! - **`autolink`**: `<...>` autolinks and bare URLs
//! - **`paired`**, **`custom`**: host-defined rules

pub mod autolink;
pub mod code_span;
pub mod custom;
pub mod emphasis;
pub mod link;
pub mod paired;
pub mod text;

pub use code_span::CodeSpan;
pub use custom::CustomSyntax;
pub use paired::PairedSyntax;
pub use text::TextSyntax;
