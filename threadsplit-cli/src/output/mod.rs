//! Output formatting module

use anyhow::Result;
use serde::Deserialize;
use std::io::Write;
use threadsplit_core::Thread;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format one split input
    ///
    /// `source` names the input and `limit` is the grapheme limit the thread
    /// was split for.
    fn format_thread(&mut self, source: &str, limit: usize, thread: &Thread) -> Result<()>;

    /// Finalize output (e.g., write the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Each part under a "--- part i/n ---" header
    #[default]
    Text,
    /// JSON array of threads with offsets and reply references
    Json,
    /// Markdown numbered list of parts
    Markdown,
}

/// Options shared by the formatters
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Print a heading naming each input
    pub show_source: bool,
    /// Pretty print JSON output
    pub pretty_json: bool,
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<W>(
    format: OutputFormat,
    writer: W,
    options: FormatOptions,
) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => {
            Box::new(TextFormatter::new(writer).with_source_headers(options.show_source))
        }
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(options.pretty_json)),
        OutputFormat::Markdown => {
            Box::new(MarkdownFormatter::new(writer).with_source_headers(options.show_source))
        }
    }
}
