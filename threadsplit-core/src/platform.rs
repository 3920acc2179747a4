//! Posting platforms with known length limits

use crate::error::SplitError;
use std::fmt;
use std::str::FromStr;

/// A social platform whose post limit is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    /// Bluesky, 300 graphemes per post
    #[default]
    Bluesky,
    /// Mastodon with the default 500 character instance limit
    Mastodon,
}

impl Platform {
    /// All known platforms
    pub const ALL: [Platform; 2] = [Platform::Bluesky, Platform::Mastodon];

    /// Grapheme limit per post
    pub fn limit(&self) -> usize {
        match self {
            Platform::Bluesky => 300,
            Platform::Mastodon => 500,
        }
    }

    /// End marker appended to continued posts
    pub fn end_marker(&self) -> &'static str {
        "..."
    }

    /// Lowercase identifier used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Bluesky => "bluesky",
            Platform::Mastodon => "mastodon",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Bluesky => "Bluesky",
            Platform::Mastodon => "Mastodon",
        }
    }
}

impl FromStr for Platform {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bluesky" | "bsky" => Ok(Platform::Bluesky),
            "mastodon" | "fediverse" => Ok(Platform::Mastodon),
            other => Err(SplitError::Config(format!("unknown platform '{other}'"))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
