//! Split configuration

use crate::error::{Result, SplitError};
use crate::platform::Platform;
use crate::scanner::grapheme_len;
use crate::splitter::{SplitOptions, ThreadSplitter};
use crate::traits::SpanDetector;

/// Default configuration constants
pub mod defaults {
    /// Default grapheme limit per part (Bluesky)
    pub const LIMIT: usize = 300;

    /// Default end marker
    pub const END_MARKER: &str = "...";
}

/// Everything needed to split a text: limit, end marker and search options
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitConfig {
    pub(crate) limit: usize,
    pub(crate) end_marker: String,
    pub(crate) options: SplitOptions,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            limit: defaults::LIMIT,
            end_marker: defaults::END_MARKER.to_string(),
            options: SplitOptions::default(),
        }
    }
}

impl SplitConfig {
    /// Create a configuration builder
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::default()
    }

    /// Configuration matching a platform's limit and marker
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            limit: platform.limit(),
            end_marker: platform.end_marker().to_string(),
            options: SplitOptions::default(),
        }
    }

    /// Grapheme limit per part, end marker included
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Marker appended to non-final parts
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Candidate search options
    pub fn options(&self) -> SplitOptions {
        self.options
    }

    /// Graphemes available for content in a non-final part
    pub fn budget(&self) -> Option<usize> {
        self.limit
            .checked_sub(grapheme_len(&self.end_marker))
            .filter(|&budget| budget > 0)
    }

    /// Build a splitter using these options and `detector`
    pub fn splitter<D: SpanDetector>(&self, detector: D) -> ThreadSplitter<D> {
        ThreadSplitter::with_options(detector, self.options)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidLimit`] when the end marker does not fit
    /// and [`SplitError::Config`] for out-of-range thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(SplitError::Config("limit must be greater than 0".into()));
        }

        if self.budget().is_none() {
            return Err(SplitError::InvalidLimit {
                limit: self.limit,
                marker_len: grapheme_len(&self.end_marker),
            });
        }

        for (name, value) in [
            ("sentence_threshold", self.options.sentence_threshold),
            ("line_break_threshold", self.options.line_break_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SplitError::Config(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Fluent builder for [`SplitConfig`]
#[derive(Debug, Default)]
pub struct SplitConfigBuilder {
    platform: Option<Platform>,
    limit: Option<usize>,
    end_marker: Option<String>,
    sentence_threshold: Option<f64>,
    line_break_threshold: Option<f64>,
}

impl SplitConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a platform preset
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Start from a platform preset given by name
    pub fn platform_name(self, name: &str) -> Result<Self> {
        Ok(self.platform(name.parse()?))
    }

    /// Override the grapheme limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Override the end marker
    pub fn end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = Some(marker.into());
        self
    }

    /// Override the sentence lookback threshold
    pub fn sentence_threshold(mut self, ratio: f64) -> Self {
        self.sentence_threshold = Some(ratio);
        self
    }

    /// Override the line-break lookback threshold
    pub fn line_break_threshold(mut self, ratio: f64) -> Self {
        self.line_break_threshold = Some(ratio);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SplitConfig> {
        let mut config = self
            .platform
            .map(SplitConfig::for_platform)
            .unwrap_or_default();

        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(marker) = self.end_marker {
            config.end_marker = marker;
        }
        if let Some(ratio) = self.sentence_threshold {
            config.options.sentence_threshold = ratio;
        }
        if let Some(ratio) = self.line_break_threshold {
            config.options.line_break_threshold = ratio;
        }

        config.validate()?;
        Ok(config)
    }
}
