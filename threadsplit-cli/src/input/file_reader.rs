//! Text reading with UTF-8 validation

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Reads whole inputs as UTF-8 text
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        log::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    /// Read everything from `reader` as UTF-8 text
    pub fn read_from<R: Read>(mut reader: R, name: &str) -> Result<String> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read {name}"))?;

        log::debug!("Read {} bytes from {name}", content.len());
        Ok(content)
    }
}
