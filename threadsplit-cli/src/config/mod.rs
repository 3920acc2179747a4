//! Configuration file support
//!
//! A configuration file is TOML with three optional tables:
//!
//! ```toml
//! [split]
//! platform = "mastodon"
//! end_marker = "…"
//! sentence_threshold = 0.9
//! line_break_threshold = 0.95
//! protect_links = true
//!
//! [output]
//! format = "json"
//! pretty_json = true
//!
//! [platforms.mastodon]
//! limit = 1000
//! ```
//!
//! `[platforms.<name>]` adjusts a platform preset, for instance a Mastodon
//! instance with a raised limit.

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use threadsplit_core::{Platform, SplitConfig};

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Splitting configuration
    #[serde(default)]
    pub split: SplitSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,

    /// Per-platform preset adjustments keyed by platform name
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformSection>,
}

/// Splitting-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitSection {
    /// Default target platform
    pub platform: Option<String>,

    /// Grapheme limit per part, end marker included
    pub limit: Option<usize>,

    /// Marker appended to every part but the last
    pub end_marker: Option<String>,

    /// Fill ratio from which sentence boundaries become candidates
    pub sentence_threshold: Option<f64>,

    /// Fill ratio from which line-break opportunities become candidates
    pub line_break_threshold: Option<f64>,

    /// Never pick a break inside a detected link
    #[serde(default = "default_protect_links")]
    pub protect_links: bool,
}

fn default_protect_links() -> bool {
    true
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            platform: None,
            limit: None,
            end_marker: None,
            sentence_threshold: None,
            line_break_threshold: None,
            protect_links: default_protect_links(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Default output format
    pub format: Option<OutputFormat>,

    /// Pretty print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: None,
            pretty_json: default_pretty_json(),
        }
    }
}

/// Adjustments to one platform preset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSection {
    /// Replacement grapheme limit
    pub limit: Option<usize>,

    /// Replacement end marker
    pub end_marker: Option<String>,
}

/// Settings taken from command-line flags or environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Target platform
    pub platform: Option<Platform>,
    /// Grapheme limit per part
    pub limit: Option<usize>,
    /// End marker
    pub end_marker: Option<String>,
}

impl CliConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The `[split]` platform, if any
    pub fn platform(&self) -> Result<Option<Platform>, CliError> {
        self.split
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()
            .map_err(CliError::from)
    }

    /// Adjustments for `platform` from the `[platforms]` table
    pub fn platform_section(
        &self,
        platform: Platform,
    ) -> Result<Option<&PlatformSection>, CliError> {
        for (name, section) in &self.platforms {
            if name.parse::<Platform>()? == platform {
                return Ok(Some(section));
            }
        }
        Ok(None)
    }

    /// Resolve the split configuration
    ///
    /// Overrides win over the `[split]` table, which wins over
    /// `[platforms.<name>]`, which wins over the built-in platform preset.
    pub fn split_config(&self, overrides: &Overrides) -> Result<SplitConfig, CliError> {
        let platform = match overrides.platform {
            Some(platform) => platform,
            None => self.platform()?.unwrap_or_default(),
        };
        let preset = self.platform_section(platform)?.cloned().unwrap_or_default();

        let mut builder = SplitConfig::builder().platform(platform);
        if let Some(limit) = overrides.limit.or(self.split.limit).or(preset.limit) {
            builder = builder.limit(limit);
        }
        if let Some(marker) = overrides
            .end_marker
            .clone()
            .or_else(|| self.split.end_marker.clone())
            .or(preset.end_marker)
        {
            builder = builder.end_marker(marker);
        }
        if let Some(ratio) = self.split.sentence_threshold {
            builder = builder.sentence_threshold(ratio);
        }
        if let Some(ratio) = self.split.line_break_threshold {
            builder = builder.line_break_threshold(ratio);
        }

        let config = builder.build()?;
        log::debug!(
            "Resolved {platform} configuration: limit {}, end marker {:?}",
            config.limit(),
            config.end_marker()
        );
        Ok(config)
    }

    /// Check that every platform resolves to a usable configuration
    pub fn validate(&self) -> Result<Vec<(Platform, SplitConfig)>, CliError> {
        self.platform()?;
        for name in self.platforms.keys() {
            name.parse::<Platform>()?;
        }

        Platform::ALL
            .into_iter()
            .map(|platform| {
                let overrides = Overrides {
                    platform: Some(platform),
                    ..Overrides::default()
                };
                Ok((platform, self.split_config(&overrides)?))
            })
            .collect()
    }
}
