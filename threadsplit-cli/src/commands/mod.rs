//! CLI command implementations

use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use std::io::{self, Write};
use threadsplit_core::Platform;

pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into a thread of size-bounded parts
    Split(split::SplitArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a configuration file
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::List { subcommand } => subcommand.write_to(&mut io::stdout().lock()),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List supported platforms and their limits
    Platforms,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the listing to `out`
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        match self {
            ListCommands::Platforms => {
                writeln!(out, "Supported platforms:")?;
                for platform in Platform::ALL {
                    writeln!(
                        out,
                        "  {:<10} {} ({} graphemes, end marker {:?})",
                        platform.id(),
                        platform.name(),
                        platform.limit(),
                        platform.end_marker()
                    )?;
                }
            }
            ListCommands::Formats => {
                writeln!(out, "Output formats:")?;
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
                        writeln!(out, "  {:<10} {}", value.get_name(), help)?;
                    }
                }
            }
        }
        Ok(())
    }
}
