//! Error type for `vendorboard-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored timestamp is outside the range `chrono` can represent.
  #[error("invalid timestamp {0} for key {1:?}")]
  Timestamp(i64, String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
