//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request was rejected; nothing was written.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The backing store could not be read or written. The caller must not
  /// render a partial table.
  #[error("storage unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Unavailable(Box::new(e))
  }
}

impl From<sitecheck_core::Error> for ApiError {
  fn from(e: sitecheck_core::Error) -> Self { Self::BadRequest(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { Self::BadRequest(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(e) => {
        tracing::error!(error = %e, "storage unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
