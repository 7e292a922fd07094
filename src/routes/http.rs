//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//!
//! Bodies are taken as raw JSON values and deserialized by hand so that a
//! malformed body surfaces as our own 400 payload rather than the framework's
//! rejection.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::protocol::{
  GenerateOut, GenerateRequest, HealthOut, OptimizeOut, OptimizeRequest, ValidateOut,
  ValidateRequest,
};
use crate::state::AppState;

fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
  serde_json::from_value(body).map_err(|e| ApiError::invalid(vec![e.to_string()]))
}

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<serde_json::Value>,
) -> Result<Json<GenerateOut>, ApiError> {
  let req: GenerateRequest = decode(body)?;
  let problems = state.generate_problems(&req).await?;
  info!(target: "generate", count = problems.len(), language = %req.language, "HTTP problems served");
  Ok(Json(GenerateOut { problems }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_validate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<serde_json::Value>,
) -> Result<Json<ValidateOut>, ApiError> {
  let req: ValidateRequest = decode(body)?;
  let out = state.validate_code(&req).await?;
  info!(target: "generate", title = %req.problem_title, valid = out.is_valid, "HTTP validation served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_optimize(
  State(state): State<Arc<AppState>>,
  Json(body): Json<serde_json::Value>,
) -> Result<Json<OptimizeOut>, ApiError> {
  let req: OptimizeRequest = decode(body)?;
  let out = state.optimize_code(&req).await?;
  info!(target: "generate", title = %req.problem_title, feedback_len = out.optimization_feedback.len(), "HTTP optimization served");
  Ok(Json(out))
}
