//! Error handling for the CLI application

use std::fmt;
use threadsplit_core::SplitError;

/// Failures specific to the command line front end
#[derive(Debug)]
pub enum CliError {
    /// Input file missing or a pattern matched nothing
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// Configuration file or option error
    ConfigError(String),
    /// The splitter rejected the input
    SplitFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SplitFailed(msg) => write!(f, "Split failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<SplitError> for CliError {
    fn from(error: SplitError) -> Self {
        match error {
            SplitError::InvalidLimit { .. } | SplitError::Config(_) => {
                CliError::ConfigError(error.to_string())
            }
            SplitError::Pattern(_) => CliError::SplitFailed(error.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
