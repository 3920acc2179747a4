//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "THREADSPLIT_CONFIG",
        required = true
    )]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        self.write_report(&mut io::stdout().lock())
    }

    fn write_report(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Validating configuration: {}", self.config.display())?;

        let resolved = CliConfig::load(&self.config).and_then(|config| {
            let platforms = config.validate()?;
            Ok((config, platforms))
        });

        match resolved {
            Ok((config, platforms)) => {
                writeln!(out, "✓ Configuration is valid!")?;
                for (platform, split) in platforms {
                    writeln!(
                        out,
                        "  {}: limit {}, end marker {:?}",
                        platform.id(),
                        split.limit(),
                        split.end_marker()
                    )?;
                }
                writeln!(out, "  Link protection: {}", config.split.protect_links)?;
                Ok(())
            }
            Err(e) => {
                writeln!(out, "✗ Configuration is invalid!")?;
                writeln!(out, "  Error: {e}")?;
                Err(e.context("Validation failed"))
            }
        }
    }
}
