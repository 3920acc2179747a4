//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use threadsplit_core::Thread;

/// Markdown formatter - each thread as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    source_headers: bool,
    part_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            source_headers: false,
            part_count: 0,
        }
    }

    /// Print a `## source` heading before each thread
    pub fn with_source_headers(mut self, enabled: bool) -> Self {
        self.source_headers = enabled;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_thread(&mut self, source: &str, _limit: usize, thread: &Thread) -> Result<()> {
        if self.source_headers {
            writeln!(self.writer, "## {source}")?;
            writeln!(self.writer)?;
        }
        for (index, part) in thread.parts().iter().enumerate() {
            // Continuation lines stay inside the list item.
            let item = part.text.replace('\n', "\n   ");
            writeln!(self.writer, "{}. {}", index + 1, item)?;
        }
        writeln!(self.writer)?;

        self.part_count += thread.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total parts: {}*", self.part_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
