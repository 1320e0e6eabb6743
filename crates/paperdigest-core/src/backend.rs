use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to load model: {0}")]
    Load(String),
    #[error("tokenization failed: {0}")]
    Tokenization(String),
    #[error("generation failed: {0}")]
    Generation(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text extraction step; section
/// segmentation and summarization live in `paperdigest-parsing` and
/// `paperdigest-model`.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text of a PDF from its raw bytes: each page's
    /// text followed by a newline, concatenated in document order,
    /// then trimmed.
    fn extract_text(&self, data: &[u8]) -> Result<String, BackendError>;
}

/// Trait for abstractive summarization backends.
///
/// Implementors receive non-empty section text and return a summary.
/// The empty-input sentinel and error capture are handled by
/// [`crate::summarize_section`], not by implementors.
pub trait SummaryBackend: Send + Sync {
    fn summarize(&self, text: &str) -> Result<String, ModelError>;
}
