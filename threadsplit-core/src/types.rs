//! Core types shared by the scanner, detectors and splitter

use core::fmt;
use core::ops::Range;

/// A half-open byte range `[start, end)` into a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteSpan {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl ByteSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this span
    pub fn contains_span(&self, other: ByteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether a cut at `offset` would fall strictly inside this span
    pub fn splits_at(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    /// The span as a `Range` for slicing
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for ByteSpan {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One user-perceived character and the break facts that follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Byte span of the cluster in the source text
    pub span: ByteSpan,
    /// A sentence boundary falls immediately after this cluster
    pub sentence_end: bool,
    /// A line-break opportunity exists immediately after this cluster
    pub line_break_after: bool,
}

impl Cluster {
    /// Slice the cluster's text out of its source
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.range()]
    }
}
