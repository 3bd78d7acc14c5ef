//! Delimiter run classification for `*`, `_` and `~` runs.
//!
//! Flanking is decided from the single character on either side of the run.
//! Both sides fall back to a synthetic newline at the edges of the input, and
//! whitespace and punctuation use ASCII classes only.

/// Characters that count as punctuation next to a delimiter run.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Characters that count as whitespace next to a delimiter run.
const WHITESPACE: &str = " \t\r\n";

const EDGE: char = '\n';

/// A run of identical marker characters with its flanking classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterRun {
    pub marker: u8,
    pub len: usize,
    pub left_flanking: bool,
    pub right_flanking: bool,
    pub preceded_by_punctuation: bool,
    pub followed_by_punctuation: bool,
}

impl DelimiterRun {
    /// Classifies the run `source[run_start..run_end]`.
    ///
    /// Returns `None` when the run is neither left- nor right-flanking, in
    /// which case it can neither open nor close anything.
    pub fn classify(source: &str, run_start: usize, run_end: usize) -> Option<Self> {
        let marker = *source.as_bytes().get(run_start)?;
        let preceding = source[..run_start].chars().next_back().unwrap_or(EDGE);
        let following = source[run_end..].chars().next().unwrap_or(EDGE);

        let preceded_by_whitespace = WHITESPACE.contains(preceding);
        let followed_by_whitespace = WHITESPACE.contains(following);
        let preceded_by_punctuation = PUNCTUATION.contains(preceding);
        let followed_by_punctuation = PUNCTUATION.contains(following);

        let left_flanking = !followed_by_whitespace
            && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);
        let right_flanking = !preceded_by_whitespace
            && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

        if !left_flanking && !right_flanking {
            return None;
        }

        Some(Self {
            marker,
            len: run_end - run_start,
            left_flanking,
            right_flanking,
            preceded_by_punctuation,
            followed_by_punctuation,
        })
    }

    /// Whether the run can open emphasis. `_` and `~` may not open intraword.
    pub fn can_open(&self) -> bool {
        self.left_flanking
            && (self.marker == b'*' || !self.right_flanking || self.preceded_by_punctuation)
    }

    /// Whether the run can close emphasis. `_` and `~` may not close intraword.
    pub fn can_close(&self) -> bool {
        self.right_flanking
            && (self.marker == b'*' || !self.left_flanking || self.followed_by_punctuation)
    }

    pub fn can_open_and_close(&self) -> bool {
        self.can_open() && self.can_close()
    }
}
