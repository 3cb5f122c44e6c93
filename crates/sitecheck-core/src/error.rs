//! Error types for `sitecheck-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A caller-supplied record was rejected; nothing was written.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("unknown validation status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown field: {0:?}")]
  UnknownField(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
