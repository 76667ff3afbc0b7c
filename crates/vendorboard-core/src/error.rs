//! Error types for `vendorboard-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("csv output is not valid UTF-8")]
  CsvEncoding,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single upstream report fetch.
///
/// Neither variant is retried; both surface to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  /// The upstream credential is absent. Raised before any network activity.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// Transport failure, non-success status, or a body that is not JSON.
  #[error("upstream error: {0}")]
  Upstream(String),
}
