use crate::backend::SummaryBackend;
use crate::section::SummaryOutcome;

/// Returned in place of a summary when a section's text is empty.
pub const NO_CONTENT_SENTINEL: &str = "No content available for summarization.";

/// Summarize a single section's text.
///
/// Empty text short-circuits to [`SummaryOutcome::Empty`] without
/// touching the backend. Backend failures are captured as
/// [`SummaryOutcome::Failed`] so one bad section never blocks the
/// others.
pub fn summarize_section(backend: &dyn SummaryBackend, text: &str) -> SummaryOutcome {
    if text.is_empty() {
        return SummaryOutcome::Empty;
    }

    match backend.summarize(text) {
        Ok(summary) => SummaryOutcome::Summarized(summary),
        Err(e) => {
            tracing::warn!(error = %e, "section summarization failed");
            SummaryOutcome::Failed(e.to_string())
        }
    }
}
