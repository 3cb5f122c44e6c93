//! HTTP server wiring for sitecheck.
//!
//! Mounts the JSON API from `sitecheck-api` under `/api`, adds request
//! tracing, and defines the runtime configuration read by the binary.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use sitecheck_core::store::RecordStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SITECHECK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  /// The CSV table file; created with seed rows if missing.
  #[serde(default = "default_data_file")]
  pub data_file: PathBuf,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8501 }

fn default_data_file() -> PathBuf { PathBuf::from("site_records.csv") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:      default_host(),
      port:      default_port(),
      data_file: default_data_file(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`] for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", sitecheck_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
