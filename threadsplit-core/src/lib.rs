//! Grapheme-aware splitting of long posts into threads
//!
//! Social platforms limit posts by user-perceived characters. This crate
//! divides a long text into an ordered sequence of parts that each fit such a
//! limit, preferring to break at sentence boundaries, then at line-break
//! opportunities, and never choosing a break candidate inside a link.
//!
//! # Architecture
//!
//! - [`scanner`]: walks grapheme clusters with sentence and line-break facts
//! - [`links`]: relaxed URL detection producing protected spans
//! - [`splitter`]: the single-pass splitting algorithm
//! - [`thread`]: the resulting parts and their reply chain
//! - [`config`] and [`platform`]: limits, end markers and presets
//!
//! # Example
//!
//! ```rust
//! use threadsplit_core::{LinkDetector, ThreadSplitter};
//!
//! let splitter = ThreadSplitter::new(LinkDetector::new().unwrap());
//! let text = "First sentence here. Second one follows.";
//! let thread = splitter.split(text, 25, "...").unwrap();
//!
//! assert_eq!(thread.len(), 2);
//! assert_eq!(thread.parts()[0].text, "First sentence here. ...");
//! assert_eq!(thread.parts()[1].text, "Second one follows.");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod links;
pub mod platform;
pub mod scanner;
pub mod splitter;
pub mod thread;
pub mod traits;
pub mod types;

use error::Result;

// Re-export key types
pub use config::{SplitConfig, SplitConfigBuilder};
pub use error::SplitError;
pub use links::LinkDetector;
pub use platform::Platform;
pub use scanner::{grapheme_len, GraphemeScanner};
pub use splitter::{SplitOptions, ThreadSplitter};
pub use thread::{ReplyRef, Thread, ThreadPart};
pub use traits::{NoSpans, SpanDetector};
pub use types::{ByteSpan, Cluster};

/// Split `text` into posts of at most `limit` graphemes, links protected
///
/// Every post but the last ends with `end_marker`.
///
/// The link patterns are compiled on every call. To split many texts, build
/// a [`ThreadSplitter`] once and reuse it.
///
/// # Errors
///
/// Returns [`SplitError::InvalidLimit`] when `end_marker` does not fit within
/// `limit`.
///
/// ```rust
/// let parts = threadsplit_core::split("Short post.", 300, "...").unwrap();
/// assert_eq!(parts, vec!["Short post."]);
///
/// assert!(threadsplit_core::split("Short post.", 3, "...").is_err());
/// ```
pub fn split(text: &str, limit: usize, end_marker: &str) -> Result<Vec<String>> {
    let splitter = ThreadSplitter::with_links()?;
    Ok(splitter.split(text, limit, end_marker)?.into_texts())
}

/// Split `text` according to a validated [`SplitConfig`]
///
/// Like [`split`], this compiles the link patterns per call; reuse
/// [`SplitConfig::splitter`] for repeated splits.
///
/// # Errors
///
/// Returns the configuration's validation error, if any.
pub fn split_with_config(text: &str, config: &SplitConfig) -> Result<Thread> {
    config.validate()?;
    config
        .splitter(LinkDetector::new()?)
        .split(text, config.limit(), config.end_marker())
}
