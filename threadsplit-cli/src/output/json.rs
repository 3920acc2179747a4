//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use threadsplit_core::Thread;

/// JSON formatter - outputs all threads as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    threads: Vec<ThreadData>,
}

/// One split input in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadData {
    /// Input name, `<stdin>` for standard input
    pub source: String,
    /// Grapheme limit the thread was split for
    pub limit: usize,
    /// Marker appended to non-final parts
    pub end_marker: String,
    /// Parts in posting order
    pub parts: Vec<PartData>,
}

/// One thread part in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct PartData {
    /// Zero-based position in the thread
    pub index: usize,
    /// Text to post, end marker included
    pub text: String,
    /// Start of the part's content in the input
    pub byte_start: usize,
    /// End of the part's content in the input
    pub byte_end: usize,
    /// Visible grapheme count, end marker excluded
    pub graphemes: usize,
    /// Index of the part this one replies to
    pub reply_to: Option<usize>,
    /// Index of the thread root
    pub root: Option<usize>,
}

impl ThreadData {
    /// Convert a split thread for output
    pub fn new(source: &str, limit: usize, thread: &Thread) -> Self {
        let replies = std::iter::once(None).chain(thread.reply_refs().map(Some));
        let parts = thread
            .parts()
            .iter()
            .zip(replies)
            .enumerate()
            .map(|(index, (part, reply))| PartData {
                index,
                text: part.text.clone(),
                byte_start: part.span.start,
                byte_end: part.span.end,
                graphemes: part.graphemes,
                reply_to: reply.map(|r| r.parent),
                root: reply.map(|r| r.root),
            })
            .collect();

        Self {
            source: source.to_string(),
            limit,
            end_marker: thread.end_marker().to_string(),
            parts,
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            threads: Vec::new(),
        }
    }

    /// Choose between pretty and compact output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_thread(&mut self, source: &str, limit: usize, thread: &Thread) -> Result<()> {
        self.threads.push(ThreadData::new(source, limit, thread));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.threads)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.threads)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
