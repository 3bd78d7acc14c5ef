use crate::document::Document;
use crate::escape::escape_html;
use crate::node::Element;
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::TagStack;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": the content is taken verbatim, so no other
/// inline rule ever sees it.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds the closing run for an opening run of `n` backticks whose
    /// content starts at `from`. Returns the offset of the closing run.
    ///
    /// The closer must be a maximal run of exactly `n` backticks with at
    /// least one byte of content before it.
    pub fn find_closer(s: &str, from: usize, n: usize) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if bytes[i] != Self::TICK {
                i += 1;
                continue;
            }
            let run = bytes[i..].iter().take_while(|&&b| b == Self::TICK).count();
            if run == n && i > from {
                return Some(i);
            }
            i += run;
        }
        None
    }

    /// Turns line endings into spaces and strips one space from each end
    /// when both ends have one and the content is not all spaces.
    pub fn normalize(content: &str) -> String {
        let content = content.replace("\r\n", " ").replace('\n', " ");
        let stripped = content
            .strip_prefix(' ')
            .and_then(|c| c.strip_suffix(' '))
            .filter(|_| content.bytes().any(|b| b != b' '));
        stripped.unwrap_or(content.as_str()).to_string()
    }
}

/// Attempts to parse a code span starting at the current position.
///
/// Refuses to start in the middle of a backtick run: once a run failed to
/// open a span, none of its tail may open one either.
pub fn try_parse(cursor: &mut Cursor<'_>, stack: &mut TagStack, document: &Document) -> bool {
    if cursor.peek() != Some(CodeSpan::TICK) {
        return false;
    }
    if cursor.char_before(cursor.pos) == Some(CodeSpan::TICK as char) {
        return false;
    }

    let open = cursor.run_len(cursor.pos, CodeSpan::TICK);
    let inner_start = cursor.pos + open;
    let Some(inner_end) = CodeSpan::find_closer(cursor.s, inner_start, open) else {
        return false;
    };

    let content = CodeSpan::normalize(&cursor.s[inner_start..inner_end]);
    let content = if document.encode_html() {
        escape_html(&content)
    } else {
        content
    };

    stack.flush(cursor);
    stack.add_node(Element::text("code", content).into());
    cursor.consume(inner_end + open - cursor.pos);
    true
}
