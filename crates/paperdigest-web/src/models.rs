use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use paperdigest_core::SummaryMap;

/// Returned verbatim when the form is submitted without a file.
pub const MISSING_FILE_MESSAGE: &str = "Error: Please upload a valid PDF file.";

/// Top-level failure body: `{"Error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Every outcome of the summarize endpoint, rendered explicitly
/// instead of catching exceptions at the boundary.
pub enum SummarizeResponse {
    /// The six-section summary object.
    Summaries(SummaryMap),
    /// The pipeline failed before producing any result.
    Failure(String),
    /// No file was uploaded; nothing was processed.
    MissingFile,
}

impl IntoResponse for SummarizeResponse {
    fn into_response(self) -> Response {
        match self {
            SummarizeResponse::Summaries(map) => Json(map).into_response(),
            SummarizeResponse::Failure(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody { error: message }),
            )
                .into_response(),
            SummarizeResponse::MissingFile => {
                (StatusCode::BAD_REQUEST, MISSING_FILE_MESSAGE).into_response()
            }
        }
    }
}
