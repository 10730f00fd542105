//! # pagewatch
//!
//! Poll a URL and extract a fragment of the response with a small
//! CSS-like selector (`tag`, `.class`, `#id`, space for descendants) or
//! a regular expression, alerting when the extracted value changes.
//!
//! The selector engine is a single-pass streaming matcher: the document
//! is tokenized but never parsed into a DOM. A cursor over the compiled
//! selector chain tracks how much of the chain the currently open tag
//! ancestry satisfies, and the first text node seen with the whole
//! chain satisfied is the match.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagewatch::{query_html, Selector};
//!
//! let html = "<ul><li>A</li><li id='b'>B</li></ul>";
//! assert_eq!(query_html(html, &Selector::parse("li"), None).as_deref(), Some("A"));
//! assert_eq!(query_html(html, &Selector::parse("#b"), None).as_deref(), Some("B"));
//! ```

mod error;

/// Selector compilation: tag, class and id steps.
pub mod selector;

/// Streaming selector matching over tag/text events.
pub mod matcher;

/// Extraction entry points and tokenizer plumbing.
pub mod extract;

/// Response body decoding (charset detection and transcoding).
pub mod encoding;

/// Blocking HTTP fetch.
pub mod fetch;

/// Change alerts: bell, system sounds, body diffs.
pub mod notify;

/// The poll loop.
pub mod watch;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{query_html, Query};
pub use fetch::{ClientConfig, PageFetcher};
pub use matcher::ChainMatcher;
pub use notify::{Notifier, SystemSound};
pub use selector::{Selector, Step};
pub use watch::Watcher;
