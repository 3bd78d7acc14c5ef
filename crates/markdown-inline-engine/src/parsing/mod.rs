pub mod inline;
pub mod snapshot;

pub use inline::{ExtensionSet, InlineSyntax, parse_inline};
