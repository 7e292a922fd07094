//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Difficulty, LearningFocus, Problem};

/// Body of `POST /api/problems/generate`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
  pub language: String,
  pub topics: Vec<String>,
  pub difficulty: Vec<Difficulty>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom_instructions: Option<String>,
  pub count: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub learning_focus: Option<LearningFocus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub framework_name: Option<String>,
}

impl GenerateRequest {
  /// Schema checks that deserialization alone cannot express.
  /// Errors are reported verbatim in the 400 body.
  pub fn validate(&self) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if self.count < 1 || self.count > 10 {
      errors.push(format!("count: must be between 1 and 10, got {}", self.count));
    }
    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }
}

#[derive(Debug, Serialize)]
pub struct GenerateOut {
  pub problems: Vec<Problem>,
}

/// Body of `POST /api/code/validate`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
  pub code: String,
  pub language: String,
  pub problem_title: String,
  pub problem_description: String,
  #[serde(default)]
  pub solution_code: Option<String>,
}

/// Evaluator verdict. Always returned with a 200, even when the model
/// reply could not be parsed (safe-default body).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOut {
  #[serde(default)]
  pub is_valid: bool,
  #[serde(default)]
  pub output: String,
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub feedback: String,
}

impl ValidateOut {
  /// Fixed fallback when the model reply cannot be parsed at all.
  pub fn safe_default() -> Self {
    Self {
      is_valid: false,
      output: "Could not execute code.".into(),
      error: Some("Error parsing API response.".into()),
      feedback: "We encountered an issue validating your code. Please try again later.".into(),
    }
  }
}

/// Body of `POST /api/code/optimize`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
  pub code: String,
  pub language: String,
  pub problem_title: String,
  pub problem_description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOut {
  #[serde(default)]
  pub optimization_feedback: String,
}

impl OptimizeOut {
  pub fn safe_default() -> Self {
    Self {
      optimization_feedback:
        "We encountered an issue generating optimization suggestions. Please try again later."
          .into(),
    }
  }
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn count_bounds_are_enforced() {
    let mut req: GenerateRequest = serde_json::from_value(serde_json::json!({
      "language": "python",
      "topics": ["loops"],
      "difficulty": ["easy"],
      "count": 5
    }))
    .expect("valid request");
    assert!(req.validate().is_ok());

    req.count = 0;
    let errors = req.validate().expect_err("count too low");
    assert!(errors[0].contains("between 1 and 10"));

    req.count = 11;
    assert!(req.validate().is_err());
  }

  #[test]
  fn wire_names_are_camel_case() {
    let req: GenerateRequest = serde_json::from_value(serde_json::json!({
      "language": "javascript",
      "topics": ["closures"],
      "difficulty": ["medium"],
      "count": 1,
      "customInstructions": "be brief",
      "learningFocus": "job-preparation",
      "frameworkName": "react"
    }))
    .expect("parse");
    assert_eq!(req.custom_instructions.as_deref(), Some("be brief"));
    assert_eq!(req.framework_name.as_deref(), Some("react"));
  }

  #[test]
  fn validate_out_tolerates_missing_fields() {
    let v: ValidateOut = serde_json::from_str("{\"isValid\": true}").expect("parse");
    assert!(v.is_valid);
    assert!(v.output.is_empty());
    assert!(v.error.is_none());
  }
}
