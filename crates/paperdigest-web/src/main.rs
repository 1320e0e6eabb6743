use std::net::SocketAddr;
use std::sync::Arc;

mod handlers;
mod models;
mod state;
mod template;
mod upload;

use paperdigest_core::Config;
use paperdigest_pipeline::PaperProcessor;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load the model once at startup; it is reused for every request.
    let config = Config::from_env();
    tracing::info!(model = %config.model_id, "loading summarization model");
    let processor = PaperProcessor::from_config(&config)?;

    let state = Arc::new(AppState {
        processor: Arc::new(processor),
        model_id: config.model_id,
    });

    // Uploads are single PDFs; 50MB covers any reasonable paper.
    let body_limit = axum::extract::DefaultBodyLimit::max(50 * 1024 * 1024);

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route(
            "/summarize",
            axum::routing::post(handlers::summarize::summarize),
        )
        .layer(body_limit)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 5001));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
