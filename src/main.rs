//! CodeQuest · AI Coding Practice Backend
//!
//! - Axum HTTP API (problem generation, code validation, code optimization)
//! - Together AI integration (via environment variables) with mock fallback
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   TOGETHER_AI_API_KEY : enables Together AI integration if present
//!   TOGETHER_BASE_URL   : default "https://api.together.xyz/v1"
//!   TOGETHER_MODEL      : default "meta-llama/Llama-3-8b-chat-hf"
//!   PROMPTS_CONFIG_PATH : path to TOML config (prompt templates)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod catalog;
mod config;
mod domain;
mod error;
mod fallback;
mod logic;
mod protocol;
mod provider;
mod routes;
mod state;
mod store;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (Together AI client, prompt templates).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "codequest_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
