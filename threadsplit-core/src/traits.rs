//! Detector seam between the splitter and span detection

use crate::types::ByteSpan;

/// Finds byte ranges of a text that must not be used as cut candidates
///
/// Implementations are stateless over their input so one detector can serve
/// any number of concurrent splits.
pub trait SpanDetector: Send + Sync {
    /// Return the protected spans of `text`
    ///
    /// Spans must not overlap each other. Their order is unspecified.
    fn find_spans(&self, text: &str) -> Vec<ByteSpan>;
}

/// A detector that protects nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpans;

impl SpanDetector for NoSpans {
    fn find_spans(&self, _text: &str) -> Vec<ByteSpan> {
        Vec::new()
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for &D {
    fn find_spans(&self, text: &str) -> Vec<ByteSpan> {
        (**self).find_spans(text)
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for Box<D> {
    fn find_spans(&self, text: &str) -> Vec<ByteSpan> {
        (**self).find_spans(text)
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for std::sync::Arc<D> {
    fn find_spans(&self, text: &str) -> Vec<ByteSpan> {
        (**self).find_spans(text)
    }
}
