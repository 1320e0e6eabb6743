use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// Render the index page, injecting the loaded model id.
pub fn render_index(model_id: &str) -> Html<String> {
    let html = INDEX_HTML.replace("{{ model_id }}", model_id);
    Html(html)
}
