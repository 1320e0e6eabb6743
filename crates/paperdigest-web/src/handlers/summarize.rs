use axum::extract::{Multipart, State};
use std::sync::Arc;

use crate::models::SummarizeResponse;
use crate::state::AppState;
use crate::upload;

/// Accept an uploaded PDF and return the six-section summary object.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> SummarizeResponse {
    let file = match upload::parse_multipart(multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return SummarizeResponse::MissingFile,
        Err(message) => return SummarizeResponse::Failure(message),
    };

    tracing::info!(filename = %file.filename, bytes = file.data.len(), "processing upload");

    // Extraction and inference are CPU-bound; keep them off the runtime.
    let processor = state.processor.clone();
    let result =
        tokio::task::spawn_blocking(move || processor.process(&file.data)).await;

    match result {
        Ok(Ok(summaries)) => SummarizeResponse::Summaries(summaries),
        Ok(Err(e)) => SummarizeResponse::Failure(e.to_string()),
        Err(e) => SummarizeResponse::Failure(format!("Processing task failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::post;
    use paperdigest_core::NO_CONTENT_SENTINEL;
    use paperdigest_core::mock::{MockPdfBackend, MockSummaryBackend};
    use paperdigest_pipeline::PaperProcessor;
    use tower::ServiceExt;

    use crate::models::MISSING_FILE_MESSAGE;

    const BOUNDARY: &str = "X-TEST-BOUNDARY";

    fn app(backend: MockPdfBackend, summarizer: MockSummaryBackend) -> Router {
        let processor = PaperProcessor::new(Arc::new(backend), Arc::new(summarizer));
        let state = Arc::new(AppState {
            processor: Arc::new(processor),
            model_id: "test-model".into(),
        });
        Router::new()
            .route("/summarize", post(summarize))
            .with_state(state)
    }

    fn pdf_form(filename: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"pdf\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post_summarize(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/summarize")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn form_without_a_file_returns_the_missing_file_literal() {
        let app = app(
            MockPdfBackend::succeeding("unused"),
            MockSummaryBackend::succeeding("unused"),
        );

        let empty_form = format!("--{BOUNDARY}--\r\n").into_bytes();
        let response = app.oneshot(post_summarize(empty_form)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        assert_eq!(body, MISSING_FILE_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn extraction_failure_returns_json_error_body() {
        let app = app(
            MockPdfBackend::failing("bad xref"),
            MockSummaryBackend::succeeding("unused"),
        );

        let response = app
            .oneshot(post_summarize(pdf_form("paper.pdf", b"%PDF-1.5 broken")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(
            json["Error"]
                .as_str()
                .unwrap()
                .contains("bad xref")
        );
    }

    #[tokio::test]
    async fn non_pdf_payload_is_rejected_before_the_pipeline() {
        let app = app(
            MockPdfBackend::succeeding("unused"),
            MockSummaryBackend::succeeding("unused"),
        );

        let response = app
            .oneshot(post_summarize(pdf_form("paper.pdf", b"PK\x03\x04 zip bytes")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(json["Error"].as_str().unwrap().contains("valid PDF"));
    }

    #[tokio::test]
    async fn successful_upload_returns_the_six_section_object() {
        let app = app(
            MockPdfBackend::succeeding("Abstract\nThis paper studies X."),
            MockSummaryBackend::succeeding("condensed"),
        );

        let response = app
            .oneshot(post_summarize(pdf_form("paper.pdf", b"%PDF-1.5 data")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert_eq!(json["abstract"], "condensed");
        assert_eq!(json["conclusion"], NO_CONTENT_SENTINEL);
    }
}
