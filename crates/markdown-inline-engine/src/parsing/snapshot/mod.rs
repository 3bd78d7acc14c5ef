//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts parsed trees to a stable, indented outline for
//!   `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (no empty text
//!   leaves, no adjacent text leaves)
//!
//! Parsing behavior is pinned down by snapshot tests of real inputs rather
//! than a separate formal grammar.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::normalize;
