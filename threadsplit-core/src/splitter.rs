//! The thread splitting algorithm
//!
//! A single left-to-right pass over the grapheme clusters of a text. Clusters
//! are counted since the last cut; once the count reaches the effective limit
//! (limit minus the end marker's length) a cut is taken at the best point
//! seen in the tail of the current part:
//!
//! 1. the last sentence boundary recorded once the part was at least
//!    `sentence_threshold` full,
//! 2. otherwise the last line-break opportunity recorded once the part was at
//!    least `line_break_threshold` full,
//! 3. otherwise a hard cut after the current cluster, moved back to the
//!    nearest earlier point outside any protected span if it would land
//!    inside one.
//!
//! Clusters that lie inside a protected span (a link) are never recorded as
//! sentence or line-break candidates. Clusters after the chosen cut carry
//! over into the next part.

use crate::error::{Result, SplitError};
use crate::links::LinkDetector;
use crate::scanner::{grapheme_len, GraphemeScanner};
use crate::thread::{Thread, ThreadPart};
use crate::traits::SpanDetector;
use crate::types::ByteSpan;

/// Default tuning for candidate search
pub mod defaults {
    /// Fill ratio from which sentence boundaries are recorded
    pub const SENTENCE_THRESHOLD: f64 = 0.90;

    /// Fill ratio from which line-break opportunities are recorded
    pub const LINE_BREAK_THRESHOLD: f64 = 0.95;
}

/// How far back into a full part the splitter looks for a natural cut
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitOptions {
    /// Minimum fill ratio (0.0..=1.0) for a sentence boundary to be a candidate
    pub sentence_threshold: f64,
    /// Minimum fill ratio (0.0..=1.0) for a line break to be a candidate
    pub line_break_threshold: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            sentence_threshold: defaults::SENTENCE_THRESHOLD,
            line_break_threshold: defaults::LINE_BREAK_THRESHOLD,
        }
    }
}

/// A possible cut: byte offset and the cluster count since the last cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    offset: usize,
    count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutKind {
    Sentence,
    LineBreak,
    Hard,
    BeforeLink,
}

/// Splits text into thread parts that fit a per-post grapheme limit
#[derive(Debug, Clone)]
pub struct ThreadSplitter<D = LinkDetector> {
    detector: D,
    options: SplitOptions,
}

impl ThreadSplitter<LinkDetector> {
    /// A splitter protecting links found by the default [`LinkDetector`]
    pub fn with_links() -> Result<Self> {
        Ok(Self::new(LinkDetector::new()?))
    }
}

impl<D: SpanDetector> ThreadSplitter<D> {
    /// Create a splitter with default options
    pub fn new(detector: D) -> Self {
        Self::with_options(detector, SplitOptions::default())
    }

    /// Create a splitter with explicit options
    pub fn with_options(detector: D, options: SplitOptions) -> Self {
        Self { detector, options }
    }

    /// The candidate search options
    pub fn options(&self) -> SplitOptions {
        self.options
    }

    /// The protected-span detector
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Split `text` into parts of at most `limit` graphemes including `end_marker`
    ///
    /// Every part but the last gets `end_marker` appended. An empty text
    /// yields an empty thread.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidLimit`] when the end marker is as long as
    /// the limit or longer.
    pub fn split(&self, text: &str, limit: usize, end_marker: &str) -> Result<Thread> {
        let marker_len = grapheme_len(end_marker);
        let effective = limit
            .checked_sub(marker_len)
            .filter(|&budget| budget > 0)
            .ok_or(SplitError::InvalidLimit { limit, marker_len })?;

        let protected = ProtectedSpans::new(self.detector.find_spans(text));
        log::debug!(
            "splitting {} bytes with budget {} ({} protected spans)",
            text.len(),
            effective,
            protected.len()
        );

        let mut parts = Vec::new();
        let mut count = 0usize;
        let mut last_cut = 0usize;
        let mut sentence: Option<Candidate> = None;
        let mut line_break: Option<Candidate> = None;
        let mut safe: Option<Candidate> = None;

        let mut clusters = GraphemeScanner::new(text).peekable();
        while let Some(cluster) = clusters.next() {
            count += 1;
            let end = cluster.span.end;

            // The last cluster never forces a cut: what remains fits as the final part.
            if count == effective && clusters.peek().is_some() {
                let (cut, kind) = if let Some(candidate) = sentence {
                    (candidate, CutKind::Sentence)
                } else if let Some(candidate) = line_break {
                    (candidate, CutKind::LineBreak)
                } else {
                    let hard = Candidate { offset: end, count };
                    match safe {
                        Some(before) if protected.splits(hard.offset) => {
                            (before, CutKind::BeforeLink)
                        }
                        _ => (hard, CutKind::Hard),
                    }
                };

                log::debug!(
                    "cut {:?} at byte {} after {} graphemes",
                    kind,
                    cut.offset,
                    cut.count
                );
                parts.push(ThreadPart {
                    span: ByteSpan::new(last_cut, cut.offset),
                    graphemes: cut.count,
                    text: format!("{}{}", &text[last_cut..cut.offset], end_marker),
                    is_final: false,
                });

                last_cut = cut.offset;
                count -= cut.count;
                sentence = None;
                line_break = None;
                // A safe point past the cut still belongs to the next part.
                safe = safe
                    .filter(|point| point.offset > cut.offset)
                    .map(|point| Candidate {
                        offset: point.offset,
                        count: point.count - cut.count,
                    });
            }

            if count == 0 {
                continue;
            }
            if !protected.splits(end) {
                safe = Some(Candidate { offset: end, count });
            }
            if protected.contains(cluster.span) {
                continue;
            }

            let filled = count as f64 / effective as f64;
            if cluster.sentence_end && filled >= self.options.sentence_threshold {
                log::trace!("sentence candidate at byte {end} ({count} graphemes)");
                sentence = Some(Candidate { offset: end, count });
            }
            if cluster.line_break_after && filled >= self.options.line_break_threshold {
                log::trace!("line-break candidate at byte {end} ({count} graphemes)");
                line_break = Some(Candidate { offset: end, count });
            }
        }

        if count > 0 {
            parts.push(ThreadPart {
                span: ByteSpan::new(last_cut, text.len()),
                graphemes: count,
                text: text[last_cut..].to_string(),
                is_final: true,
            });
        }

        log::debug!("split into {} parts", parts.len());
        Ok(Thread::new(parts, end_marker))
    }
}

/// Protected spans sorted by start with overlaps merged
#[derive(Debug, Default)]
struct ProtectedSpans(Vec<ByteSpan>);

impl ProtectedSpans {
    fn new(mut spans: Vec<ByteSpan>) -> Self {
        spans.retain(|span| !span.is_empty());
        spans.sort_unstable();

        let mut merged: Vec<ByteSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start < last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        Self(merged)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// The last span starting at or before `offset`
    fn last_starting_by(&self, offset: usize) -> Option<ByteSpan> {
        let index = self.0.partition_point(|span| span.start <= offset);
        index.checked_sub(1).map(|i| self.0[i])
    }

    fn contains(&self, span: ByteSpan) -> bool {
        self.last_starting_by(span.start)
            .is_some_and(|protected| protected.contains_span(span))
    }

    fn splits(&self, offset: usize) -> bool {
        self.last_starting_by(offset)
            .is_some_and(|protected| protected.splits_at(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoSpans;

    /// Protects a fixed set of spans regardless of the text
    struct FixedSpans(Vec<ByteSpan>);

    impl SpanDetector for FixedSpans {
        fn find_spans(&self, _text: &str) -> Vec<ByteSpan> {
            self.0.clone()
        }
    }

    fn texts(thread: &Thread) -> Vec<&str> {
        thread.texts().collect()
    }

    fn split_plain(text: &str, limit: usize, marker: &str) -> Thread {
        ThreadSplitter::new(NoSpans).split(text, limit, marker).unwrap()
    }

    #[test]
    fn test_marker_as_long_as_limit_is_invalid() {
        let splitter = ThreadSplitter::new(NoSpans);
        for (limit, marker) in [(3, "..."), (2, "..."), (0, ""), (1, "…!")] {
            let err = splitter.split("anything", limit, marker).unwrap_err();
            assert!(matches!(err, SplitError::InvalidLimit { .. }), "{limit} {marker:?}");
        }
    }

    #[test]
    fn test_marker_length_counts_graphemes() {
        // One flag is eight bytes but a single grapheme.
        let thread = split_plain("abcdef", 3, "🇯🇵");
        assert_eq!(texts(&thread), vec!["ab🇯🇵", "cd🇯🇵", "ef"]);
    }

    #[test]
    fn test_empty_text_yields_no_parts() {
        let thread = split_plain("", 10, "...");
        assert!(thread.is_empty());
    }

    #[test]
    fn test_short_text_is_one_unmarked_part() {
        let thread = split_plain("Hello world.", 300, "...");
        assert_eq!(texts(&thread), vec!["Hello world."]);
        assert!(thread.parts()[0].is_final);
        assert_eq!(thread.parts()[0].graphemes, 12);
    }

    #[test]
    fn test_text_of_exactly_the_budget_is_one_part() {
        let thread = split_plain("abcd", 5, ".");
        assert_eq!(texts(&thread), vec!["abcd"]);
    }

    #[test]
    fn test_hard_cuts_without_boundaries() {
        let thread = split_plain("aaaaaaaaaa", 5, ".");
        assert_eq!(texts(&thread), vec!["aaaa.", "aaaa.", "aa"]);
        let spans: Vec<ByteSpan> = thread.parts().iter().map(|p| p.span).collect();
        assert_eq!(
            spans,
            vec![ByteSpan::new(0, 4), ByteSpan::new(4, 8), ByteSpan::new(8, 10)]
        );
    }

    #[test]
    fn test_sentence_boundary_beats_line_break() {
        // Sentence boundary after 18 graphemes, line break after the first ideograph at 19.
        let text = format!("{}. {}", "a".repeat(16), "中".repeat(10));
        let thread = split_plain(&text, 23, "...");

        assert_eq!(
            texts(&thread),
            vec![
                format!("{}. ...", "a".repeat(16)),
                "中".repeat(10),
            ]
        );
        assert_eq!(thread.parts()[0].graphemes, 18);
        assert_eq!(thread.parts()[1].graphemes, 10);
    }

    #[test]
    fn test_line_break_used_without_sentence() {
        let text = format!("{} {}", "a".repeat(18), "b".repeat(10));
        let thread = split_plain(&text, 23, "...");
        assert_eq!(
            texts(&thread),
            vec![format!("{} ...", "a".repeat(18)), "b".repeat(10)]
        );
    }

    #[test]
    fn test_line_break_before_threshold_is_ignored() {
        // The space sits at 18/20 graphemes, below the 95% line-break threshold.
        let text = format!("{} {}", "a".repeat(17), "b".repeat(10));
        let thread = split_plain(&text, 23, "...");
        assert_eq!(
            texts(&thread),
            vec![format!("{} bb...", "a".repeat(17)), "b".repeat(8)]
        );
    }

    #[test]
    fn test_sentence_window_bounds_the_lookback() {
        // Two 150-grapheme sentences: the boundary sits at 151 of a 297 budget.
        let first = format!("{}.", "a".repeat(149));
        let second = format!("{}.", "B".repeat(149));
        let text = format!("{first} {second}");

        let thread = split_plain(&text, 300, "...");
        assert_eq!(thread.parts()[0].graphemes, 297);

        let options = SplitOptions {
            sentence_threshold: 0.5,
            ..SplitOptions::default()
        };
        let splitter = ThreadSplitter::with_options(NoSpans, options);
        let thread = splitter.split(&text, 300, "...").unwrap();
        assert_eq!(
            texts(&thread),
            vec![format!("{first} ..."), second.clone()]
        );
    }

    #[test]
    fn test_protected_cluster_is_not_a_candidate() {
        let text = "aaaa bbbb cccc";
        let options = SplitOptions {
            line_break_threshold: 0.5,
            ..SplitOptions::default()
        };

        let open = ThreadSplitter::with_options(NoSpans, options);
        let thread = open.split(text, 13, ".").unwrap();
        assert_eq!(texts(&thread), vec!["aaaa bbbb .", "cccc"]);

        let guarded = ThreadSplitter::with_options(FixedSpans(vec![ByteSpan::new(5, 10)]), options);
        let thread = guarded.split(text, 13, ".").unwrap();
        assert_eq!(texts(&thread), vec!["aaaa bbbb cc.", "cc"]);
    }

    #[test]
    fn test_hard_cut_backs_off_before_link() {
        let text = "see https://example.com/a/very/long/path/indeed for more";
        let splitter = ThreadSplitter::with_links().unwrap();
        let thread = splitter.split(text, 47, "...").unwrap();

        assert_eq!(
            texts(&thread),
            vec![
                "see ...",
                "https://example.com/a/very/long/path/indeed ...",
                "for more",
            ]
        );
    }

    #[test]
    fn test_unprotected_hard_cut_lands_inside_link() {
        let text = "see https://example.com/a/very/long/path/indeed for more";
        let thread = split_plain(text, 47, "...");
        assert_eq!(thread.parts()[0].span, ByteSpan::new(0, 44));
    }

    #[test]
    fn test_link_longer_than_budget_is_cut() {
        let text = "see https://example.com/a/very/long/path/indeed for more";
        let splitter = ThreadSplitter::with_links().unwrap();
        let thread = splitter.split(text, 23, "...").unwrap();

        assert_eq!(thread.parts()[0].text, "see ...");
        assert_eq!(thread.parts()[1].text, "https://example.com/...");
        assert_eq!(thread.parts()[1].graphemes, 20);
        let joined: String = thread
            .parts()
            .iter()
            .map(|part| part.content(text))
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_flags_are_never_split() {
        let text = "🇯🇵".repeat(10);
        let thread = split_plain(&text, 4, ".");
        assert_eq!(thread.len(), 4);
        for part in thread.parts() {
            assert_eq!(part.span.start % 8, 0);
            assert_eq!(part.span.end % 8, 0);
        }
        assert_eq!(thread.parts()[3].text, "🇯🇵");
    }

    #[test]
    fn test_combining_marks_stay_with_base() {
        let text = "e\u{301}".repeat(7);
        let thread = split_plain(&text, 4, ".");
        assert_eq!(
            texts(&thread),
            vec![
                "e\u{301}e\u{301}e\u{301}.",
                "e\u{301}e\u{301}e\u{301}.",
                "e\u{301}",
            ]
        );
    }

    #[test]
    fn test_resplitting_a_single_part_is_identity() {
        let thread = split_plain("short post", 300, "...");
        let again = split_plain(&thread.parts()[0].text, 300, "...");
        assert_eq!(thread, again);
    }

    #[test]
    fn test_overlapping_spans_are_merged() {
        let spans = ProtectedSpans::new(vec![
            ByteSpan::new(10, 20),
            ByteSpan::new(2, 5),
            ByteSpan::new(15, 25),
            ByteSpan::new(7, 7),
        ]);
        assert_eq!(spans.0, vec![ByteSpan::new(2, 5), ByteSpan::new(10, 25)]);
        assert!(spans.splits(12));
        assert!(!spans.splits(10));
        assert!(!spans.splits(25));
        assert!(spans.contains(ByteSpan::new(20, 25)));
        assert!(!spans.contains(ByteSpan::new(4, 6)));
    }
}
