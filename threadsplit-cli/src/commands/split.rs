//! Split command implementation

use crate::config::{CliConfig, Overrides};
use crate::error::CliError;
use crate::input::{resolve_inputs, InputSource};
use crate::output::{create_formatter, FormatOptions, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use threadsplit_core::{LinkDetector, NoSpans, Platform, SpanDetector, Thread, ThreadSplitter};

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Target platform preset [default: bluesky]
    #[arg(short, long, env = "THREADSPLIT_PLATFORM", value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Grapheme limit per part, end marker included
    #[arg(short, long, env = "THREADSPLIT_LIMIT")]
    pub limit: Option<usize>,

    /// Marker appended to every part but the last
    #[arg(
        short = 'm',
        long,
        env = "THREADSPLIT_END_MARKER",
        allow_hyphen_values = true
    )]
    pub end_marker: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "THREADSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Allow breaks inside links
    #[arg(long)]
    pub no_links: bool,

    /// Split several inputs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse().map_err(|e: threadsplit_core::SplitError| e.to_string())
}

/// One input after splitting
struct SplitInput {
    name: String,
    thread: Thread,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting split");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let split_config = file_config.split_config(&self.overrides())?;
        let format = self.format.or(file_config.output.format).unwrap_or_default();

        let protect_links = file_config.split.protect_links && !self.no_links;
        let detector: Box<dyn SpanDetector> = if protect_links {
            Box::new(LinkDetector::new().map_err(CliError::from)?)
        } else {
            log::info!("Link protection disabled");
            Box::new(NoSpans)
        };
        let splitter = split_config.splitter(detector);

        let sources = resolve_inputs(&self.input)?;
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(sources.len() as u64);

        let limit = split_config.limit();
        let end_marker = split_config.end_marker();
        let split_one = |source: &InputSource| -> Result<Option<SplitInput>> {
            let thread = split_source(&splitter, source, limit, end_marker)?;
            progress.input_completed(&source.to_string());
            Ok(thread.map(|thread| SplitInput {
                name: source.to_string(),
                thread,
            }))
        };

        let results: Vec<Option<SplitInput>> = if self.parallel && sources.len() > 1 {
            log::info!("Splitting {} inputs in parallel", sources.len());
            sources.par_iter().map(split_one).collect::<Result<_>>()?
        } else {
            sources.iter().map(split_one).collect::<Result<_>>()?
        };
        progress.finish();

        let inputs: Vec<SplitInput> = results.into_iter().flatten().collect();
        if inputs.is_empty() {
            if !self.quiet {
                eprintln!("Nothing to split");
            }
            return Ok(());
        }

        let options = FormatOptions {
            show_source: inputs.len() > 1,
            pretty_json: file_config.output.pretty_json,
        };
        let mut formatter = create_formatter(format, self.open_output()?, options);
        for input in &inputs {
            formatter.format_thread(&input.name, limit, &input.thread)?;
        }
        formatter.finish()?;

        let parts: usize = inputs.iter().map(|input| input.thread.len()).sum();
        log::info!("Split {} inputs into {} parts", inputs.len(), parts);
        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            platform: self.platform,
            limit: self.limit,
            end_marker: self.end_marker.clone(),
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Read and split one input; whitespace-only inputs yield `None`
///
/// Trailing whitespace is dropped before splitting.
fn split_source<D: SpanDetector>(
    splitter: &ThreadSplitter<D>,
    source: &InputSource,
    limit: usize,
    end_marker: &str,
) -> Result<Option<Thread>> {
    let content = source.read()?;
    let text = content.trim_end();
    if text.trim_start().is_empty() {
        log::warn!("{source}: nothing to split");
        return Ok(None);
    }

    let thread = splitter
        .split(text, limit, end_marker)
        .map_err(|e| CliError::SplitFailed(format!("{source}: {e}")))?;
    log::debug!("{source}: {} parts", thread.len());
    Ok(Some(thread))
}
