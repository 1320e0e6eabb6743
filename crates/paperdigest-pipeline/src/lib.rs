use std::sync::Arc;

use thiserror::Error;

use paperdigest_core::{
    Config, PdfBackend, SectionKind, SummaryBackend, SummaryMap, summarize_section,
};
use paperdigest_model::FlanT5Summarizer;
use paperdigest_pdf_lopdf::LopdfBackend;

// Re-export domain types for convenience
pub use paperdigest_core::{BackendError, ModelError, SectionMap, SummaryOutcome};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Extraction(#[from] BackendError),
    #[error("failed to load summarization model: {0}")]
    ModelLoad(ModelError),
}

/// The end-to-end processor: PDF bytes in, per-section summaries out.
///
/// Both stages are injected as trait objects; the model is loaded once
/// at construction and reused for the process lifetime.
pub struct PaperProcessor {
    backend: Arc<dyn PdfBackend>,
    summarizer: Arc<dyn SummaryBackend>,
}

impl PaperProcessor {
    pub fn new(backend: Arc<dyn PdfBackend>, summarizer: Arc<dyn SummaryBackend>) -> Self {
        Self {
            backend,
            summarizer,
        }
    }

    /// Build the default lopdf + flan-t5 processor from configuration.
    /// Loads (or fetches) the model, so this is the slow startup step.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let summarizer = FlanT5Summarizer::load(config).map_err(PipelineError::ModelLoad)?;
        Ok(Self::new(
            Arc::new(LopdfBackend::new()),
            Arc::new(summarizer),
        ))
    }

    /// Process one uploaded paper: extract text, segment into the six
    /// canonical sections, and summarize each section independently in
    /// fixed order.
    ///
    /// Extraction failure aborts the whole document. Summarization
    /// failures are section-local and end up inside the returned map.
    pub fn process(&self, data: &[u8]) -> Result<SummaryMap, PipelineError> {
        let text = self.backend.extract_text(data)?;
        tracing::debug!(chars = text.len(), "extracted PDF text");

        let sections = paperdigest_parsing::segment_sections(&text);

        let mut summaries = SummaryMap::default();
        for kind in SectionKind::ALL {
            let outcome = summarize_section(self.summarizer.as_ref(), sections.get(kind));
            if outcome.is_failed() {
                tracing::warn!(section = %kind, "summarization failed for section");
            }
            summaries.set(kind, outcome);
        }

        Ok(summaries)
    }
}
