//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST API under `/api/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  // Static files with SPA fallback
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/api/health", get(http::http_health))
    .route("/api/problems/generate", post(http::http_post_generate))
    .route("/api/code/validate", post(http::http_post_validate))
    .route("/api/code/optimize", post(http::http_post_optimize))
    // State + CORS + HTTP tracing
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    // Frontend fallback
    .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Prompts;
  use axum::body::Body;
  use axum::http::{header, Method, Request, StatusCode};
  use tower::ServiceExt;

  fn app() -> Router {
    build_router(Arc::new(AppState::with(None, Prompts::default())))
  }

  fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
      .method(Method::POST)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .expect("request")
  }

  async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
  }

  #[tokio::test]
  async fn health_answers_ok() {
    let response = app()
      .oneshot(Request::builder().uri("/api/health").body(Body::empty()).expect("request"))
      .await
      .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
  }

  #[tokio::test]
  async fn malformed_generate_body_is_a_400_with_errors() {
    let response = app()
      .oneshot(post_json(
        "/api/problems/generate",
        serde_json::json!({ "language": "python" }),
      ))
      .await
      .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid request data");
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
  }

  #[tokio::test]
  async fn out_of_range_count_is_a_400() {
    let response = app()
      .oneshot(post_json(
        "/api/problems/generate",
        serde_json::json!({
          "language": "python",
          "topics": ["loops"],
          "difficulty": ["easy"],
          "count": 11
        }),
      ))
      .await
      .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["errors"][0].as_str().is_some_and(|e| e.contains("between 1 and 10")));
  }

  #[tokio::test]
  async fn generate_without_credential_is_a_500() {
    let response = app()
      .oneshot(post_json(
        "/api/problems/generate",
        serde_json::json!({
          "language": "python",
          "topics": ["loops"],
          "difficulty": ["easy"],
          "count": 2
        }),
      ))
      .await
      .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "API key is required to generate problems");
  }

  #[tokio::test]
  async fn validate_without_credential_is_a_500() {
    let response = app()
      .oneshot(post_json(
        "/api/code/validate",
        serde_json::json!({
          "code": "x = 1",
          "language": "python",
          "problemTitle": "t",
          "problemDescription": "d"
        }),
      ))
      .await
      .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
