use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("Invalid pattern for inline syntax {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}
