//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error leaves the server as `{"error": "<message>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vendorboard_service::ServiceError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Service(#[from] ServiceError),

  #[error("Method not allowed")]
  MethodNotAllowed,

  #[error("Not found")]
  NotFound,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Service(e) => {
        tracing::error!(error = %e, "report request failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
