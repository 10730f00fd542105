//! Streaming selector matching over a tag/text event stream.
//!
//! [`ChainMatcher`] consumes start-tag, end-tag and text events in
//! document order and tracks how much of a selector chain is satisfied
//! by the currently open ancestry, without building a DOM. It is
//! independent of any particular tokenizer: events arrive as plain
//! method calls, so any HTML tokenizer that reports tags with attribute
//! lists and character data can drive it.

use regex::Regex;

use crate::selector::Selector;

/// Single-pass matcher state for one document parse.
///
/// The `cursor` counts how many leading steps of the chain are
/// satisfied by open tags; the marker stack records, per open tag,
/// whether that tag advanced the cursor, so closing tags roll the
/// cursor back correctly at any nesting depth. Invariant: the number of
/// advancing markers on the stack always equals the cursor.
///
/// Each start tag is tested only against the next unmatched step.
/// Sibling tags that fail the test still open a stack frame, they just
/// do not advance the cursor.
///
/// The first text node seen while the whole chain is satisfied becomes
/// the match. With an in-node regex, the first regex match inside such
/// a text node becomes the match instead, and a text node the regex
/// does not match leaves the matcher armed for later candidates. Once
/// a match is recorded, all further text is ignored.
#[derive(Debug)]
pub struct ChainMatcher<'a> {
    selector: &'a Selector,
    regex: Option<&'a Regex>,
    cursor: usize,
    stack: Vec<bool>,
    pending: Option<String>,
    matched: Option<String>,
}

impl<'a> ChainMatcher<'a> {
    /// Creates a matcher for one selector chain, with an optional regex
    /// applied inside matched text nodes.
    #[must_use]
    pub fn new(selector: &'a Selector, regex: Option<&'a Regex>) -> Self {
        Self {
            selector,
            regex,
            cursor: 0,
            stack: Vec::new(),
            pending: None,
            matched: None,
        }
    }

    /// Handles a start tag with its attribute pairs.
    pub fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.seal_pending();
        let consumed = self
            .selector
            .step(self.cursor)
            .is_some_and(|step| step.matches(tag, attrs));
        self.stack.push(consumed);
        if consumed {
            self.cursor += 1;
        }
    }

    /// Handles an end tag.
    ///
    /// Tokenizers may report more end tags than start tags on malformed
    /// input; a pop with no open tag is ignored.
    pub fn end_tag(&mut self) {
        self.seal_pending();
        if let Some(consumed) = self.stack.pop() {
            if consumed {
                self.cursor -= 1;
            }
        }
    }

    /// Handles character data.
    ///
    /// Tokenizers are free to split one text node into several chunks
    /// (around character references, for instance), so chunks are
    /// buffered here and judged as a unit at the next tag boundary.
    pub fn text(&mut self, data: &str) {
        if self.matched.is_some() || self.cursor != self.selector.len() {
            return;
        }
        self.pending.get_or_insert_with(String::new).push_str(data);
    }

    /// Signals end of input and takes the recorded match, if any.
    pub fn finish(&mut self) -> Option<String> {
        self.seal_pending();
        self.matched.take()
    }

    /// Restores the initial state, clearing any recorded match, so the
    /// matcher can be fed a fresh document.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.stack.clear();
        self.pending = None;
        self.matched = None;
    }

    /// Judges the buffered text node, if one is pending.
    fn seal_pending(&mut self) {
        let Some(buffer) = self.pending.take() else {
            return;
        };
        if self.matched.is_some() {
            return;
        }
        self.matched = match self.regex {
            Some(regex) => regex.find(&buffer).map(|m| m.as_str().to_string()),
            None => Some(buffer),
        };
    }
}
