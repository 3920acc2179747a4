//! Split results: thread parts and the reply chain between them

use crate::types::ByteSpan;

/// One post of a thread
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreadPart {
    /// Byte range of the part's content in the source text
    pub span: ByteSpan,
    /// Visible grapheme count, end marker excluded
    pub graphemes: usize,
    /// Content followed by the end marker unless this is the final part
    pub text: String,
    /// Whether this is the last part of the thread
    pub is_final: bool,
}

impl ThreadPart {
    /// The part's content without any appended end marker
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.range()]
    }
}

/// Reply references for posting a part after the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplyRef {
    /// Index of the part being posted
    pub index: usize,
    /// Index of the part it replies to
    pub parent: usize,
    /// Index of the thread root
    pub root: usize,
}

/// An ordered sequence of thread parts exactly tiling a source text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thread {
    parts: Vec<ThreadPart>,
    end_marker: String,
}

impl Thread {
    pub(crate) fn new(parts: Vec<ThreadPart>, end_marker: impl Into<String>) -> Self {
        Self {
            parts,
            end_marker: end_marker.into(),
        }
    }

    /// The parts in posting order
    pub fn parts(&self) -> &[ThreadPart] {
        &self.parts
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the source text was empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The end marker appended to non-final parts
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Iterate over the posted texts
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.iter().map(|part| part.text.as_str())
    }

    /// Consume the thread, keeping only the posted texts
    pub fn into_texts(self) -> Vec<String> {
        self.parts.into_iter().map(|part| part.text).collect()
    }

    /// Reply references for every part after the first
    ///
    /// Each part replies to the one before it and names the first part as
    /// the thread root.
    pub fn reply_refs(&self) -> impl Iterator<Item = ReplyRef> + '_ {
        (1..self.parts.len()).map(|index| ReplyRef {
            index,
            parent: index - 1,
            root: 0,
        })
    }
}

impl IntoIterator for Thread {
    type Item = ThreadPart;
    type IntoIter = std::vec::IntoIter<ThreadPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Thread {
    type Item = &'a ThreadPart;
    type IntoIter = std::slice::Iter<'a, ThreadPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
