//! Input sources: files and standard input

use super::{resolve_patterns, FileReader};
use anyhow::Result;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Pattern standing for standard input
pub const STDIN_PATTERN: &str = "-";

/// Where a text to split comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Read the whole source as UTF-8 text
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => FileReader::read_from(io::stdin().lock(), "<stdin>"),
            InputSource::File(path) => FileReader::read_text(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Turn `-i` arguments into input sources
///
/// No patterns, or the pattern `-`, means standard input. Standard input
/// comes first and is read at most once.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    let (stdin, files): (Vec<&String>, Vec<&String>) = patterns
        .iter()
        .partition(|pattern| pattern.as_str() == STDIN_PATTERN);

    let mut sources = Vec::new();
    if patterns.is_empty() || !stdin.is_empty() {
        sources.push(InputSource::Stdin);
    }
    if !files.is_empty() {
        let files: Vec<String> = files.into_iter().cloned().collect();
        sources.extend(resolve_patterns(&files)?.into_iter().map(InputSource::File));
    }

    Ok(sources)
}
