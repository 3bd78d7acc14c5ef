use std::sync::Arc;

use regex::Regex;

use crate::document::Document;
use crate::error::SyntaxError;
use crate::node::{Element, Node};
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::{OpenRule, TagStack, TagState};
use crate::parsing::inline::syntax::anchored;

/// A host-defined paired construct such as `==marked==` → `<mark>`.
///
/// Unlike emphasis it ignores flanking: any start match opens and the first
/// end match closes.
#[derive(Debug)]
pub struct PairedSyntax {
    start: Regex,
    end: Regex,
    tag: String,
}

impl PairedSyntax {
    pub fn new(start: &str, end: &str, tag: impl Into<String>) -> Result<Self, SyntaxError> {
        Ok(Self {
            start: anchored(start)?,
            end: anchored(end)?,
            tag: tag.into(),
        })
    }

    pub(crate) fn try_open(
        self: &Arc<Self>,
        cursor: &mut Cursor<'_>,
        stack: &mut TagStack,
        document: &Document,
    ) -> bool {
        let Some(len) = self.start.find(cursor.rest()).map(|m| m.len()) else {
            return false;
        };
        if len == 0 || stack.depth() >= document.max_nesting() {
            return false;
        }
        stack.flush(cursor);
        let start = cursor.pos;
        stack.push(TagState::new(
            start,
            start + len,
            OpenRule::Paired(Arc::clone(self)),
        ));
        cursor.consume(len);
        true
    }

    pub(crate) fn match_end(&self, cursor: &Cursor<'_>) -> Option<usize> {
        self.end
            .find(cursor.rest())
            .map(|m| m.len())
            .filter(|&len| len > 0)
    }

    pub(crate) fn element(&self, children: Vec<Node>) -> Node {
        Element::new(self.tag.clone(), children).into()
    }
}
