//! Error types for thread splitting

use thiserror::Error;

/// Errors raised while configuring or running the splitter
#[derive(Error, Debug)]
pub enum SplitError {
    /// The end marker leaves no room for content
    #[error(
        "end marker does not fit within the configured length limit \
         (limit {limit}, end marker {marker_len} graphemes)"
    )]
    InvalidLimit {
        /// The requested grapheme limit per part
        limit: usize,
        /// Grapheme length of the end marker
        marker_len: usize,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A detector pattern failed to compile
    #[error("invalid detector pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;
