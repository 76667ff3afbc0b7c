//! Error type for `vendorboard-service`.

use thiserror::Error;
use vendorboard_core::FetchError;

#[derive(Debug, Error)]
pub enum ServiceError {
  /// Configuration or upstream failure, passed through unchanged.
  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ServiceError::Store(Box::new(e))
  }
}
