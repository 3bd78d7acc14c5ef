/// A cursor for character-by-character inline parsing.
///
/// Tracks the read position `pos` and the start of the pending literal text
/// run `start`. Everything in `start..pos` has been skipped over as plain text
/// and not yet written to the tag stack.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub pos: usize,
    /// Start of the pending literal text run.
    pub start: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, pos: 0, start: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.pos >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.pos).copied()
    }

    /// The unparsed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.pos..).unwrap_or("")
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.pos.min(self.s.len())..].starts_with(pat)
    }

    /// The character ending right before byte index `i`.
    pub fn char_before(&self, i: usize) -> Option<char> {
        self.s.get(..i)?.chars().next_back()
    }

    /// The character starting at byte index `i`.
    pub fn char_at(&self, i: usize) -> Option<char> {
        self.s.get(i..)?.chars().next()
    }

    /// Number of consecutive `b` bytes starting at byte index `i`.
    pub fn run_len(&self, i: usize, b: u8) -> usize {
        self.s.as_bytes()[i.min(self.s.len())..]
            .iter()
            .take_while(|&&c| c == b)
            .count()
    }

    /// Start of the run of `b` bytes that ends just before byte index `i`.
    pub fn run_start(&self, i: usize, b: u8) -> usize {
        let bytes = &self.s.as_bytes()[..i.min(self.s.len())];
        i - bytes.iter().rev().take_while(|&&c| c == b).count()
    }

    /// Advances over one character, leaving it in the pending text run.
    pub fn advance_char(&mut self) {
        let len = self.char_at(self.pos).map_or(1, char::len_utf8);
        self.pos += len;
    }

    /// Advances by `n` bytes, leaving them in the pending text run.
    pub fn advance_by(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advances by `n` bytes and discards them from the pending text run.
    pub fn consume(&mut self, n: usize) {
        self.pos += n;
        self.start = self.pos;
    }

    /// Moves the read position to `pos` and starts a fresh text run there.
    pub fn reset_to(&mut self, pos: usize) {
        self.pos = pos;
        self.start = pos;
    }
}
