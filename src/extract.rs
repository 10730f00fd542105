//! Content extraction entry points.
//!
//! This module owns the tokenizer plumbing: a response body is run
//! through the html5ever tokenizer and its tag/text events are fed to a
//! [`ChainMatcher`]. Malformed markup never fails extraction; the
//! tokenizer recovers and unparsable constructs are simply skipped.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use regex::Regex;

use crate::matcher::ChainMatcher;
use crate::selector::Selector;

/// What to extract from a fetched document body.
///
/// Precedence: the whole-body flag wins over everything, then a
/// selector (with the regex filtering text inside matched nodes), then
/// a direct regex search over the body, then no match at all.
#[derive(Debug, Default)]
pub struct Query {
    /// Return the entire body, ignoring selector and regex.
    pub whole_body: bool,
    /// Selector chain to match against the tokenized body.
    pub selector: Option<Selector>,
    /// Regular expression, either standalone or as an in-node filter.
    pub regex: Option<Regex>,
}

impl Query {
    /// Applies the query to one response body.
    ///
    /// Extraction is a pure function of its inputs: the same body and
    /// query always produce the same result.
    #[must_use]
    pub fn extract(&self, body: &str) -> Option<String> {
        if self.whole_body {
            return Some(body.to_string());
        }
        if let Some(selector) = &self.selector {
            return query_html(body, selector, self.regex.as_ref());
        }
        if let Some(regex) = &self.regex {
            return regex.find(body).map(|m| m.as_str().to_string());
        }
        None
    }
}

/// Runs the selector chain over an HTML document and returns the first
/// qualifying text node, optionally filtered by `regex`.
///
/// # Example
///
/// ```rust
/// use pagewatch::{query_html, Selector};
///
/// let html = "<ul><li>First</li><li>Second</li></ul>";
/// let selector = Selector::parse("li");
/// assert_eq!(query_html(html, &selector, None).as_deref(), Some("First"));
/// ```
#[must_use]
pub fn query_html(html: &str, selector: &Selector, regex: Option<&Regex>) -> Option<String> {
    let sink = MatchSink {
        matcher: ChainMatcher::new(selector, regex),
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink.matcher.finish()
}

/// Adapts html5ever tokens to matcher events.
struct MatchSink<'a> {
    matcher: ChainMatcher<'a>,
}

impl TokenSink for MatchSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => {
                let attrs: Vec<(&str, &str)> = tag
                    .attrs
                    .iter()
                    .map(|attr| (&*attr.name.local, &*attr.value))
                    .collect();
                match tag.kind {
                    TagKind::StartTag => {
                        self.matcher.start_tag(&tag.name, &attrs);
                        // A self-closing tag opens no ancestry.
                        if tag.self_closing {
                            self.matcher.end_tag();
                        }
                    }
                    TagKind::EndTag => self.matcher.end_tag(),
                }
            }
            Token::CharacterTokens(data) => self.matcher.text(&data),
            // Parse errors arrive alongside the recovered token stream;
            // dropping them keeps malformed input non-fatal.
            Token::DoctypeToken(_)
            | Token::CommentToken(_)
            | Token::NullCharacterToken
            | Token::EOFToken
            | Token::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }
}
