//! Minimal Together AI client for our use-cases.
//!
//! We only call chat.completions with a single user message and request
//! either free text or a strict JSON response. Calls are instrumented and
//! log model names, latencies, and response sizes (not contents).
//!
//! Every external call is attempted at most once; no retries. No request
//! timeout is configured: a hung call blocks only the one in-flight
//! request, never the rest of the application.
//!
//! NOTE: We never log the API key.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct TogetherAi {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl TogetherAi {
  /// Construct the client if we find TOGETHER_AI_API_KEY; otherwise None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("TOGETHER_AI_API_KEY").ok()?;
    let base_url = std::env::var("TOGETHER_BASE_URL")
      .unwrap_or_else(|_| "https://api.together.xyz/v1".into());
    let model = std::env::var("TOGETHER_MODEL")
      .unwrap_or_else(|_| "meta-llama/Llama-3-8b-chat-hf".into());

    Some(Self { client: reqwest::Client::new(), api_key, base_url, model })
  }

  /// Single-message chat completion, returning the raw content text.
  /// `json_mode` requests a JSON-typed response_format where supported.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn chat(
    &self,
    prompt: &str,
    temperature: f32,
    max_tokens: u32,
    json_mode: bool,
  ) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![ChatMessageReq { role: "user".into(), content: prompt.into() }],
      temperature,
      max_tokens,
      response_format: json_mode.then(|| ResponseFormat { r#type: "json_object".into() }),
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "codequest-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_provider_error(&body).unwrap_or(body);
      return Err(format!("Together AI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(
        prompt_tokens = ?usage.prompt_tokens,
        completion_tokens = ?usage.completion_tokens,
        total_tokens = ?usage.total_tokens,
        "Together AI usage"
      );
    }

    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .ok_or_else(|| "Invalid API response format".to_string())?;

    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Model response received");
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  max_tokens: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq {
  role: String,
  content: String,
}
#[derive(Serialize)]
struct ResponseFormat {
  #[serde(rename = "type")]
  r#type: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)]
  usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice {
  message: ChatMessageResp,
}
#[derive(Deserialize)]
struct ChatMessageResp {
  content: Option<String>,
}
#[derive(Deserialize)]
struct Usage {
  #[serde(default)]
  prompt_tokens: Option<u32>,
  #[serde(default)]
  completion_tokens: Option<u32>,
  #[serde(default)]
  total_tokens: Option<u32>,
}

/// Try to extract a clean error message from a provider error body.
fn extract_provider_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn provider_error_body_is_unwrapped() {
    let body = "{\"error\": {\"message\": \"model overloaded\", \"code\": 503}}";
    assert_eq!(extract_provider_error(body).as_deref(), Some("model overloaded"));
    assert!(extract_provider_error("plain text failure").is_none());
  }
}
