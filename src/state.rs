//! Application state and the generation/validation/optimization flows.
//!
//! The provider is optional: without a credential the generate endpoint
//! fails with a configuration error (the server-side contract), while the
//! progress store's fallback-friendly behavior lives in the parse cascade
//! and mock tables, not here.

use tracing::{error, info, instrument, warn};

use crate::config::{load_config_from_env, Prompts};
use crate::domain::Problem;
use crate::error::ApiError;
use crate::fallback::mock_problems;
use crate::logic::{
  build_generation_prompt, build_optimization_prompt, build_validation_prompt,
  parse_feedback_object, parse_generated_problems,
};
use crate::protocol::{GenerateRequest, OptimizeOut, OptimizeRequest, ValidateOut, ValidateRequest};
use crate::provider::TogetherAi;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct AppState {
  pub provider: Option<TogetherAi>,
  pub prompts: Prompts,
}

impl AppState {
  /// Build state from env: load prompt config, init the provider client.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let prompts = load_config_from_env().map(|c| c.prompts).unwrap_or_default();

    let provider = TogetherAi::from_env();
    if let Some(p) = &provider {
      info!(target: "codequest_backend", base_url = %p.base_url, model = %p.model, "Together AI enabled.");
    } else {
      warn!(target: "codequest_backend", "Together AI disabled (no TOGETHER_AI_API_KEY). Generation will fail until configured.");
    }

    Self { provider, prompts }
  }

  /// Explicit constructor for tests and embedding.
  pub fn with(provider: Option<TogetherAi>, prompts: Prompts) -> Self {
    Self { provider, prompts }
  }

  /// Generate `req.count` problems. Provider errors surface as 500; parse
  /// failures silently fall back to the mock tables so the caller always
  /// receives exactly `count` problems.
  #[instrument(level = "info", skip(self, req), fields(language = %req.language, count = req.count))]
  pub async fn generate_problems(&self, req: &GenerateRequest) -> Result<Vec<Problem>, ApiError> {
    req.validate().map_err(ApiError::invalid)?;

    let provider = self.provider.as_ref().ok_or_else(ApiError::missing_api_key)?;
    let prompt = build_generation_prompt(&self.prompts, req);

    let content = provider
      .chat(&prompt, 0.7, 3000, true)
      .await
      .map_err(ApiError::Provider)?;

    match parse_generated_problems(&content) {
      Some(problems) => {
        info!(target: "generate", generated = problems.len(), "Problems parsed from model reply");
        Ok(problems)
      }
      None => {
        warn!(
          target: "generate",
          content = %trunc_for_log(&content, 200),
          "Could not parse model reply; using fallback mock problems"
        );
        Ok(mock_problems(&req.language, &req.topics, &req.difficulty, req.count as usize))
      }
    }
  }

  /// Ask the model to act as a code evaluator. Provider and parse failures
  /// are both absorbed into the fixed safe-default body; only a missing
  /// credential is surfaced.
  #[instrument(level = "info", skip(self, req), fields(language = %req.language, title = %req.problem_title))]
  pub async fn validate_code(&self, req: &ValidateRequest) -> Result<ValidateOut, ApiError> {
    let provider = self
      .provider
      .as_ref()
      .ok_or_else(|| ApiError::Configuration("API key is required to validate code".into()))?;
    let prompt = build_validation_prompt(&self.prompts, req);

    let content = match provider.chat(&prompt, 0.7, 2000, false).await {
      Ok(content) => content,
      Err(e) => {
        error!(target: "generate", error = %e, "Validation call failed; using safe default");
        return Ok(ValidateOut::safe_default());
      }
    };

    Ok(parse_feedback_object(&content).unwrap_or_else(|| {
      warn!(
        target: "generate",
        content = %trunc_for_log(&content, 200),
        "Could not parse validation reply; using safe default"
      );
      ValidateOut::safe_default()
    }))
  }

  /// Ask the model for optimization commentary. Same absorption policy as
  /// `validate_code`.
  #[instrument(level = "info", skip(self, req), fields(language = %req.language, title = %req.problem_title))]
  pub async fn optimize_code(&self, req: &OptimizeRequest) -> Result<OptimizeOut, ApiError> {
    let provider = self
      .provider
      .as_ref()
      .ok_or_else(|| ApiError::Configuration("API key is required to optimize code".into()))?;
    let prompt = build_optimization_prompt(&self.prompts, req);

    let content = match provider.chat(&prompt, 0.7, 2000, false).await {
      Ok(content) => content,
      Err(e) => {
        error!(target: "generate", error = %e, "Optimization call failed; using safe default");
        return Ok(OptimizeOut::safe_default());
      }
    };

    Ok(parse_feedback_object(&content).unwrap_or_else(|| {
      warn!(
        target: "generate",
        content = %trunc_for_log(&content, 200),
        "Could not parse optimization reply; using safe default"
      );
      OptimizeOut::safe_default()
    }))
  }
}

/// Lets the progress store generate straight through this state when both
/// run in the same process (tests, local single-binary setups).
impl crate::store::ProblemSource for AppState {
  async fn generate(&self, req: &GenerateRequest) -> Result<Vec<Problem>, String> {
    self.generate_problems(req).await.map_err(|e| e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(count: u32) -> GenerateRequest {
    serde_json::from_value(serde_json::json!({
      "language": "python",
      "topics": ["loops"],
      "difficulty": ["easy"],
      "count": count
    }))
    .expect("request")
  }

  #[tokio::test]
  async fn generation_without_credential_is_a_configuration_error() {
    let state = AppState::with(None, Prompts::default());
    let err = state.generate_problems(&request(2)).await.expect_err("no key");
    assert!(matches!(err, ApiError::Configuration(_)));
  }

  #[tokio::test]
  async fn invalid_count_is_rejected_before_any_provider_check() {
    let state = AppState::with(None, Prompts::default());
    let err = state.generate_problems(&request(0)).await.expect_err("bad count");
    assert!(matches!(err, ApiError::InvalidRequest { .. }));
  }

  #[tokio::test]
  async fn validate_without_credential_is_a_configuration_error() {
    let state = AppState::with(None, Prompts::default());
    let req: ValidateRequest = serde_json::from_value(serde_json::json!({
      "code": "x = 1",
      "language": "python",
      "problemTitle": "t",
      "problemDescription": "d"
    }))
    .expect("request");
    let err = state.validate_code(&req).await.expect_err("no key");
    assert!(matches!(err, ApiError::Configuration(_)));
  }
}
