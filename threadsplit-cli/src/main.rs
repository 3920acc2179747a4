//! `threadsplit` command-line entry point

use clap::Parser;
use threadsplit_cli::commands::Commands;

/// Split long posts into size-bounded threads
#[derive(Debug, Parser)]
#[command(name = "threadsplit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
