//! Health check and static pages

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use serde_json::json;

const OPENAPI_YAML: &str = include_str!("../assets/openapi.yaml");
const UI_HTML: &str = include_str!("../assets/ui.html");

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /openapi.yaml
pub async fn openapi() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_YAML)
}

/// GET /ui
pub async fn ui() -> Html<&'static str> {
    Html(UI_HTML)
}
