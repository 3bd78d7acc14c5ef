use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};

use crate::error::SyntaxError;
use crate::node::Node;
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::inline::stack::TagStack;
use crate::parsing::inline::syntax::anchored;

pub type CustomHandler = dyn Fn(&Captures<'_>) -> Option<Node> + Send + Sync;

/// A host-supplied single-shot rule, e.g. `@mention` → link.
///
/// The handler sees the captures of a match at the cursor. Returning a node
/// emits it in place of the match; returning `None` keeps the matched text as
/// literal text.
#[derive(Clone)]
pub struct CustomSyntax {
    pattern: Regex,
    handler: Arc<CustomHandler>,
}

impl CustomSyntax {
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self, SyntaxError>
    where
        F: Fn(&Captures<'_>) -> Option<Node> + Send + Sync + 'static,
    {
        Ok(Self {
            pattern: anchored(pattern)?,
            handler: Arc::new(handler),
        })
    }

    pub fn try_match(&self, cursor: &mut Cursor<'_>, stack: &mut TagStack) -> bool {
        let Some(caps) = self.pattern.captures(cursor.rest()) else {
            return false;
        };
        let len = caps[0].len();
        if len == 0 {
            return false;
        }
        let node = (self.handler)(&caps);

        stack.flush(cursor);
        match node {
            Some(node) => {
                stack.add_node(node);
                cursor.consume(len);
            }
            None => cursor.advance_by(len),
        }
        true
    }
}

impl fmt::Debug for CustomSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSyntax")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
