//! Grapheme cluster scanning
//!
//! [`GraphemeScanner`] walks a text one extended grapheme cluster at a time
//! and annotates every cluster with the two break facts the splitter needs:
//! whether a UAX #29 sentence boundary follows it and whether a UAX #14
//! line-break opportunity follows it.
//!
//! Boundary positions from the sentence and line-break algorithms are merged
//! lazily against the cluster stream, so a full scan is a single forward pass.
//! A boundary only counts when it falls exactly on a cluster's end offset.

use crate::types::{ByteSpan, Cluster};
use std::iter::Peekable;
use unicode_linebreak::linebreaks;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

type Offsets<'a> = Peekable<Box<dyn Iterator<Item = usize> + 'a>>;

/// Lazy, forward-only iterator over the grapheme clusters of a text
pub struct GraphemeScanner<'a> {
    graphemes: GraphemeIndices<'a>,
    sentence_ends: Offsets<'a>,
    line_breaks: Offsets<'a>,
}

impl<'a> GraphemeScanner<'a> {
    /// Start scanning `text` from its first cluster
    pub fn new(text: &'a str) -> Self {
        let sentence_ends: Box<dyn Iterator<Item = usize> + 'a> = Box::new(
            text.split_sentence_bound_indices()
                .map(|(start, sentence)| start + sentence.len()),
        );
        // Mandatory breaks (after a newline) are as good a cut as allowed ones.
        let line_breaks: Box<dyn Iterator<Item = usize> + 'a> =
            Box::new(linebreaks(text).map(|(offset, _)| offset));

        Self {
            graphemes: text.grapheme_indices(true),
            sentence_ends: sentence_ends.peekable(),
            line_breaks: line_breaks.peekable(),
        }
    }
}

impl Iterator for GraphemeScanner<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let (start, grapheme) = self.graphemes.next()?;
        let end = start + grapheme.len();

        Some(Cluster {
            span: ByteSpan::new(start, end),
            sentence_end: advance_to(&mut self.sentence_ends, end),
            line_break_after: advance_to(&mut self.line_breaks, end),
        })
    }
}

impl std::fmt::Debug for GraphemeScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphemeScanner")
            .field("remaining", &self.graphemes.as_str().len())
            .finish()
    }
}

/// Drop offsets before `offset` and report whether `offset` itself is next
fn advance_to(offsets: &mut Offsets<'_>, offset: usize) -> bool {
    while let Some(&next) = offsets.peek() {
        if next < offset {
            offsets.next();
        } else {
            return next == offset;
        }
    }
    false
}

/// Number of grapheme clusters in `text`
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters(text: &str) -> Vec<Cluster> {
        GraphemeScanner::new(text).collect()
    }

    #[test]
    fn test_empty_text_has_no_clusters() {
        assert!(clusters("").is_empty());
        assert_eq!(grapheme_len(""), 0);
    }

    #[test]
    fn test_single_cluster() {
        let found = clusters("a");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, ByteSpan::new(0, 1));
    }

    #[test]
    fn test_clusters_tile_the_text() {
        let text = "Hé\u{301}llo 🇯🇵 wörld 👨‍👩‍👧!";
        let found = clusters(text);

        let mut expected_start = 0;
        for cluster in &found {
            assert_eq!(cluster.span.start, expected_start);
            expected_start = cluster.span.end;
        }
        assert_eq!(expected_start, text.len());
        assert_eq!(found.len(), grapheme_len(text));
    }

    #[test]
    fn test_multi_code_point_clusters_are_single_units() {
        // base letter + combining acute, a flag, and a ZWJ family
        let text = "e\u{301}🇫🇷👨‍👩‍👧";
        let found = clusters(text);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].as_str(text), "e\u{301}");
        assert_eq!(found[1].as_str(text), "🇫🇷");
        assert_eq!(found[2].as_str(text), "👨‍👩‍👧");
    }

    #[test]
    fn test_sentence_boundary_after_trailing_space() {
        let text = "Hi there. Bye now.";
        let found = clusters(text);

        let ends: Vec<usize> = found
            .iter()
            .filter(|c| c.sentence_end)
            .map(|c| c.span.end)
            .collect();
        // The boundary sits after the space that follows the period.
        assert_eq!(ends, vec![10, text.len()]);
    }

    #[test]
    fn test_line_break_opportunities_after_spaces() {
        let text = "ab cd\nef";
        let found = clusters(text);

        let breaks: Vec<usize> = found
            .iter()
            .filter(|c| c.line_break_after)
            .map(|c| c.span.end)
            .collect();
        // After "ab ", after the newline, and the mandatory end of text.
        assert_eq!(breaks, vec![3, 6, text.len()]);
    }

    #[test]
    fn test_no_break_inside_a_word() {
        let text = "abcdef";
        let found = clusters(text);
        assert!(found[..found.len() - 1]
            .iter()
            .all(|c| !c.line_break_after && !c.sentence_end));
    }
}
