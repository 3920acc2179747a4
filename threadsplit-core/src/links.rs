//! Relaxed hyperlink detection
//!
//! [`LinkDetector`] finds substrings that look like URLs, with or without a
//! scheme. Matching is deliberately permissive: anything with a scheme
//! (`https://`, `ftp://`, `mailto:`, ...) is a link, and bare host names are
//! links when they end in a recognised top-level domain or start with `www.`.
//! Trailing sentence punctuation and unbalanced closing brackets are trimmed
//! so that "see example.com." protects only `example.com`.

use crate::error::Result;
use crate::traits::SpanDetector;
use crate::types::ByteSpan;
use regex::Regex;

const SCHEME_PATTERN: &str = r#"(?i)(?:[a-z][a-z0-9+.\-]*://|mailto:)[^\s<>"]+"#;

const HOST_PATTERN: &str = concat!(
    r"(?i)(?:[\w.+\-]+@)?",
    r"(?:[\p{L}\p{N}](?:[\p{L}\p{N}\-]{0,61}[\p{L}\p{N}])?\.)+",
    r"\p{L}{2,63}",
    r"(?::\d{1,5})?",
    r#"(?:[/?#][^\s<>"]*)?"#,
);

/// Generic top-level domains accepted for bare hosts; any two-letter ASCII
/// label is accepted as a country code.
const GENERIC_TLDS: &[&str] = &[
    "aero", "agency", "app", "art", "asia", "biz", "blog", "cat", "city", "cloud", "club", "com",
    "coop", "design", "dev", "digital", "edu", "email", "fun", "global", "gov", "info", "int",
    "jobs", "link", "live", "media", "mil", "mobi", "museum", "name", "net", "network", "news",
    "one", "online", "org", "page", "pro", "shop", "site", "social", "space", "store", "studio",
    "systems", "tech", "tel", "top", "travel", "website", "wiki", "world", "xyz", "zone",
];

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"'];

/// Detects URL-like substrings and reports them as protected spans
#[derive(Debug, Clone)]
pub struct LinkDetector {
    scheme: Regex,
    host: Regex,
}

impl LinkDetector {
    /// Compile the link patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            scheme: Regex::new(SCHEME_PATTERN)?,
            host: Regex::new(HOST_PATTERN)?,
        })
    }

    /// Find all links in `text`, in byte order
    pub fn find_links(&self, text: &str) -> Vec<ByteSpan> {
        // Scheme matches come out of `find_iter` sorted and disjoint.
        let mut links: Vec<ByteSpan> = self
            .scheme
            .find_iter(text)
            .map(|m| trim_trailing(text, m.start(), m.end()))
            .filter(|span| !span.is_empty())
            .collect();

        let mut bare = Vec::new();
        for m in self.host.find_iter(text) {
            if !has_known_tld(m.as_str()) {
                continue;
            }
            let span = trim_trailing(text, m.start(), m.end());
            // A scheme match already covers "https://example.com".
            if span.is_empty() || overlaps_any(&links, span) {
                continue;
            }
            bare.push(span);
        }

        links.extend(bare);
        links.sort_unstable();
        log::trace!("found {} links in {} bytes", links.len(), text.len());
        links
    }
}

impl Default for LinkDetector {
    fn default() -> Self {
        Self::new().expect("built-in link patterns should compile")
    }
}

impl SpanDetector for LinkDetector {
    fn find_spans(&self, text: &str) -> Vec<ByteSpan> {
        self.find_links(text)
    }
}

/// Whether `span` overlaps any of the sorted, disjoint `spans`
fn overlaps_any(spans: &[ByteSpan], span: ByteSpan) -> bool {
    let index = spans.partition_point(|s| s.start < span.end);
    index
        .checked_sub(1)
        .is_some_and(|i| spans[i].end > span.start)
}

/// Whether the host part of a bare match ends in an accepted TLD
fn has_known_tld(candidate: &str) -> bool {
    let without_user = candidate
        .rsplit_once('@')
        .map_or(candidate, |(_, host)| host);
    let host = without_user
        .split(|c| matches!(c, ':' | '/' | '?' | '#'))
        .next()
        .unwrap_or(without_user);

    if host.len() > 4
        && host
            .as_bytes()
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"www."))
    {
        return true;
    }

    let Some((_, tld)) = host.rsplit_once('.') else {
        return false;
    };
    let tld = tld.to_ascii_lowercase();

    (tld.len() == 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()))
        || GENERIC_TLDS.contains(&tld.as_str())
}

/// Shrink a match past trailing punctuation and unbalanced closing brackets
fn trim_trailing(text: &str, start: usize, end: usize) -> ByteSpan {
    let mut candidate = &text[start..end];

    while let Some(last) = candidate.chars().next_back() {
        let strip = if TRAILING_PUNCTUATION.contains(&last) {
            true
        } else {
            match last {
                ')' => unbalanced(candidate, '(', ')'),
                ']' => unbalanced(candidate, '[', ']'),
                '}' => unbalanced(candidate, '{', '}'),
                _ => false,
            }
        };
        if !strip {
            break;
        }
        candidate = &candidate[..candidate.len() - last.len_utf8()];
    }

    ByteSpan::new(start, start + candidate.len())
}

fn unbalanced(s: &str, open: char, close: char) -> bool {
    s.matches(close).count() > s.matches(open).count()
}
