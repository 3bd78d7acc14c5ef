//! The stack of open paired constructs.
//!
//! The root container is kept outside the `open` vector, so the stack can
//! never run out of a place to write text. Closing and flattening receive the
//! cursor as an explicit parameter.

use std::sync::Arc;

use crate::document::Document;
use crate::node::{Node, push_node, push_text};

use super::cursor::Cursor;
use super::delimiter::DelimiterRun;
use super::kinds::{emphasis, link, paired::PairedSyntax};

/// What kind of construct a [`TagState`] will become if it closes.
#[derive(Clone)]
pub enum OpenRule {
    /// `*`/`_` emphasis or `~` strikethrough, with the run that opened it.
    Delimited(DelimiterRun),
    /// `[` of a link.
    Link,
    /// `![` of an image.
    Image,
    /// A host-supplied paired tag.
    Paired(Arc<PairedSyntax>),
}

/// An opened-but-not-yet-closed construct.
pub struct TagState {
    /// Byte offset of the opening marker.
    pub start: usize,
    /// Byte offset just past the opening marker.
    pub end: usize,
    pub rule: OpenRule,
    /// Nodes parsed while this state was innermost.
    pub children: Vec<Node>,
}

impl TagState {
    pub fn new(start: usize, end: usize, rule: OpenRule) -> Self {
        Self {
            start,
            end,
            rule,
            children: vec![],
        }
    }

    /// Length of the opening marker.
    pub fn marker_len(&self) -> usize {
        self.end - self.start
    }
}

/// How the text at the cursor closes an open state. Each variant carries
/// what its closing handler needs from the state's rule.
#[derive(Debug, Clone)]
pub enum EndMatch {
    /// A run of `len` delimiter characters closing the run `opening`.
    Run { opening: DelimiterRun, len: usize },
    /// `]` and its destination, for a `[` or (`image`) a `![`.
    Link { end: link::LinkEnd, image: bool },
    Paired { syntax: Arc<PairedSyntax>, len: usize },
}

impl EndMatch {
    pub fn len(&self) -> usize {
        match self {
            EndMatch::Run { len, .. } | EndMatch::Paired { len, .. } => *len,
            EndMatch::Link { end, .. } => end.len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
pub struct TagStack {
    root: Vec<Node>,
    open: Vec<TagState>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open states, not counting the root.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn push(&mut self, state: TagState) {
        self.open.push(state);
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(state) => &mut state.children,
            None => &mut self.root,
        }
    }

    /// Appends a node to the innermost state.
    pub fn add_node(&mut self, node: Node) {
        push_node(self.current_children(), node);
    }

    /// Writes `source[start..end]` as literal text into the innermost state.
    pub fn write_text_range(&mut self, source: &str, start: usize, end: usize) {
        if end <= start {
            return;
        }
        push_text(self.current_children(), &source[start..end]);
    }

    /// Flushes the cursor's pending literal run into the innermost state.
    pub fn flush(&mut self, cursor: &mut Cursor<'_>) {
        self.write_text_range(cursor.s, cursor.start, cursor.pos);
        cursor.start = cursor.pos;
    }

    /// Asks every open state, innermost first, whether the cursor closes it.
    pub fn try_close_any(&mut self, cursor: &mut Cursor<'_>, document: &Document) -> bool {
        (0..self.open.len())
            .rev()
            .any(|index| self.try_close(index, cursor, document))
    }

    fn try_close(&mut self, index: usize, cursor: &mut Cursor<'_>, document: &Document) -> bool {
        let state = &self.open[index];
        let end = match &state.rule {
            OpenRule::Delimited(opening) => {
                match emphasis::match_closer(cursor, state, opening) {
                    Some(end) => end,
                    None => return false,
                }
            }
            OpenRule::Link | OpenRule::Image => match link::match_end(cursor) {
                Some(end) => EndMatch::Link {
                    end,
                    image: matches!(state.rule, OpenRule::Image),
                },
                None => return false,
            },
            OpenRule::Paired(syntax) => match syntax.match_end(cursor) {
                Some(len) => EndMatch::Paired {
                    syntax: Arc::clone(syntax),
                    len,
                },
                None => return false,
            },
        };
        self.close(index, end, cursor, document);
        true
    }

    /// Closes the state at `index` against `end`.
    ///
    /// Any states opened after it are mismatched: their opening markers are
    /// written back as text and their children are spliced into it. If the
    /// closing handler rejects the state, its own marker becomes text too and
    /// the closing text is left in the pending literal run.
    fn close(&mut self, index: usize, end: EndMatch, cursor: &mut Cursor<'_>, document: &Document) {
        let state = self.take_closing(index, cursor);
        let end_pos = cursor.pos;
        let end_len = end.len();

        let result = match end {
            EndMatch::Run { opening, len } => {
                emphasis::close(state, opening, len, self, cursor);
                Ok(())
            }
            EndMatch::Link { end, image } => link::close(state, &end, image, self, cursor, document),
            EndMatch::Paired { syntax, len } => {
                self.add_node(syntax.element(state.children));
                cursor.consume(len);
                Ok(())
            }
        };

        if let Err(state) = result {
            spill(self.current_children(), cursor.s, state);
            cursor.reset_to(end_pos);
            cursor.advance_by(end_len);
        }
    }

    /// Removes the state at `index` from the stack. The states above it are
    /// flattened into its children, followed by the pending literal run.
    fn take_closing(&mut self, index: usize, cursor: &mut Cursor<'_>) -> TagState {
        let mut unmatched = self.open.split_off(index);
        let mut state = unmatched.remove(0);
        for above in unmatched {
            spill(&mut state.children, cursor.s, above);
        }
        push_text(&mut state.children, &cursor.s[cursor.start..cursor.pos]);
        cursor.start = cursor.pos;
        state
    }

    /// Ends the parse: flattens all still-open states onto the root and
    /// returns the root's children.
    pub fn finish(mut self, cursor: &mut Cursor<'_>) -> Vec<Node> {
        let unmatched = std::mem::take(&mut self.open);
        for state in unmatched {
            spill(&mut self.root, cursor.s, state);
        }
        self.flush(cursor);
        self.root
    }
}

/// Writes an unclosed state back as its literal opening marker followed by
/// its children.
fn spill(nodes: &mut Vec<Node>, source: &str, state: TagState) {
    push_text(nodes, &source[state.start..state.end]);
    for node in state.children {
        push_node(nodes, node);
    }
}
