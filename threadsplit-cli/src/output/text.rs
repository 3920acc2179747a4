//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use threadsplit_core::Thread;

/// Plain text formatter - each part under a `--- part i/n ---` header
pub struct TextFormatter<W: Write> {
    writer: W,
    source_headers: bool,
    threads: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            source_headers: false,
            threads: 0,
        }
    }

    /// Print `==> source <==` before each thread
    pub fn with_source_headers(mut self, enabled: bool) -> Self {
        self.source_headers = enabled;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_thread(&mut self, source: &str, _limit: usize, thread: &Thread) -> Result<()> {
        if self.threads > 0 {
            writeln!(self.writer)?;
        }
        self.threads += 1;

        if self.source_headers {
            writeln!(self.writer, "==> {source} <==")?;
        }
        let total = thread.len();
        for (index, part) in thread.parts().iter().enumerate() {
            writeln!(self.writer, "--- part {}/{} ---", index + 1, total)?;
            writeln!(self.writer, "{}", part.text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
