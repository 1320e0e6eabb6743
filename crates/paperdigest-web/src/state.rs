use std::sync::Arc;

use paperdigest_pipeline::PaperProcessor;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub processor: Arc<PaperProcessor>,
    pub model_id: String,
}
