//! Error type for `sitecheck-store-csv`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] sitecheck_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// The file exists but a row (or the header) cannot be turned into a
  /// record. Rows are never repaired or skipped.
  #[error("malformed table at line {line}: {reason}")]
  Malformed { line: u64, reason: String },

  #[error("blocking task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl Error {
  /// Whether the caller's input was rejected. Every other variant means the
  /// backing file could not be read or written.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Core(sitecheck_core::Error::Validation(_)))
  }

  pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
    Self::Malformed { line, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
