//! `*`/`_` emphasis and `~` strikethrough.
//!
//! Openers are pushed for the whole delimiter run. When a closer arrives the
//! runs are reconciled: two markers from each side make `strong`, one makes
//! `em`. Unused opening markers are re-pushed as an outer state; unused
//! closing markers stay in the input and are scanned again.

use crate::document::Document;
use crate::node::Element;
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::delimiter::DelimiterRun;
use crate::parsing::inline::stack::{EndMatch, OpenRule, TagStack, TagState};

pub const ASTERISK: u8 = b'*';
pub const UNDERSCORE: u8 = b'_';
pub const TILDE: u8 = b'~';

/// Opens a delimiter run at the cursor, or skips it as literal text when the
/// run cannot open.
pub fn try_open(
    marker: u8,
    cursor: &mut Cursor<'_>,
    stack: &mut TagStack,
    document: &Document,
) -> bool {
    if cursor.peek() != Some(marker) {
        return false;
    }
    let len = cursor.run_len(cursor.pos, marker);
    stack.flush(cursor);

    let start = cursor.pos;
    let run_start = cursor.run_start(start, marker);
    match DelimiterRun::classify(cursor.s, run_start, start + len) {
        Some(run) if run.can_open() => {
            if stack.depth() >= document.max_nesting() {
                log::trace!("nesting limit reached, `{}` run at {start} left as text", marker as char);
                cursor.advance_by(len);
            } else {
                stack.push(TagState::new(start, start + len, OpenRule::Delimited(run)));
                cursor.consume(len);
            }
        }
        _ => cursor.advance_by(len),
    }
    true
}

/// Checks whether the run at the cursor closes `state`.
pub fn match_closer(
    cursor: &Cursor<'_>,
    state: &TagState,
    opening: &DelimiterRun,
) -> Option<EndMatch> {
    if cursor.peek() != Some(opening.marker) {
        return None;
    }
    let len = cursor.run_len(cursor.pos, opening.marker);
    // Markers left over from an earlier close still belong to their original
    // run for flanking purposes.
    let run_start = cursor.run_start(cursor.pos, opening.marker);
    let closing = DelimiterRun::classify(cursor.s, run_start, cursor.pos + len)?;
    if !closing.can_close() {
        return None;
    }

    let opening_len = state.marker_len();
    if opening.marker == TILDE {
        return (len == opening_len && len <= 2).then_some(EndMatch::Run {
            opening: *opening,
            len,
        });
    }

    // Rule of 3: a run that can both open and close may not pair up when the
    // combined length is a multiple of 3, unless both lengths are.
    let either_both = opening.can_open_and_close() || closing.can_open_and_close();
    let both_multiples = opening_len % 3 == 0 && len % 3 == 0;
    if either_both && (opening_len + len) % 3 == 0 && !both_multiples {
        return None;
    }
    Some(EndMatch::Run {
        opening: *opening,
        len,
    })
}

/// Turns a closed delimiter state into `em`, `strong` or `del`.
pub fn close(
    state: TagState,
    opening: DelimiterRun,
    closing_len: usize,
    stack: &mut TagStack,
    cursor: &mut Cursor<'_>,
) {
    if opening.marker == TILDE {
        stack.add_node(Element::new("del", state.children).into());
        cursor.consume(closing_len);
        return;
    }

    let opening_len = state.marker_len();
    let consumed = if opening_len >= 2 && closing_len >= 2 { 2 } else { 1 };
    let tag = if consumed == 2 { "strong" } else { "em" };

    if opening_len > consumed {
        stack.push(TagState::new(
            state.start,
            state.end - consumed,
            OpenRule::Delimited(opening),
        ));
    }
    stack.add_node(Element::new(tag, state.children).into());
    cursor.consume(consumed);
}
