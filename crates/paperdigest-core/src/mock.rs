//! Mock backends for testing pipeline behavior without a real model
//! or PDF parser.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, ModelError, PdfBackend, SummaryBackend};

/// A scripted [`SummaryBackend`] that counts invocations.
pub struct MockSummaryBackend {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl MockSummaryBackend {
    /// Always returns `summary`.
    pub fn succeeding(summary: &str) -> Self {
        Self {
            response: Ok(summary.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `summarize` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SummaryBackend for MockSummaryBackend {
    fn summarize(&self, _text: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(summary) => Ok(summary.clone()),
            Err(msg) => Err(ModelError::Generation(msg.clone())),
        }
    }
}

/// A scripted [`PdfBackend`] that ignores its input bytes.
pub struct MockPdfBackend {
    response: Result<String, String>,
}

impl MockPdfBackend {
    /// Always extracts `text`.
    pub fn succeeding(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
        }
    }

    /// Always fails opening with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

impl PdfBackend for MockPdfBackend {
    fn extract_text(&self, _data: &[u8]) -> Result<String, BackendError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(BackendError::Open(msg.clone())),
        }
    }
}
