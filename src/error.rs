//! API error taxonomy and its HTTP mapping.
//!
//! Parse failures never appear here: generation falls back to the mock
//! tables and validate/optimize fall back to fixed safe-default bodies,
//! so the UI never sees a parse error. Nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// Client-supplied data failed schema validation. Reported verbatim.
  #[error("Invalid request data")]
  InvalidRequest { errors: Vec<String> },

  /// Missing provider credential. Operator-fixable, not retried.
  #[error("{0}")]
  Configuration(String),

  /// Network/HTTP failure or non-2xx from the external API.
  #[error("{0}")]
  Provider(String),
}

impl ApiError {
  pub fn invalid(errors: Vec<String>) -> Self {
    ApiError::InvalidRequest { errors }
  }

  pub fn missing_api_key() -> Self {
    ApiError::Configuration("API key is required to generate problems".into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::InvalidRequest { errors } => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Invalid request data", "errors": errors })),
      )
        .into_response(),
      ApiError::Configuration(message) | ApiError::Provider(message) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
      )
        .into_response(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::StatusCode;

  #[test]
  fn invalid_request_maps_to_400() {
    let resp = ApiError::invalid(vec!["count: out of range".into()]).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn provider_and_config_map_to_500() {
    assert_eq!(
      ApiError::Provider("Together AI HTTP 503".into()).into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      ApiError::missing_api_key().into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
