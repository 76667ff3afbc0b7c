pub mod reports;
pub mod vendors;

use axum::{http::StatusCode, response::IntoResponse};

use crate::error::ApiError;

/// Bare `OPTIONS` on any API route: 200, no body. Real CORS preflights are
/// answered by the CORS layer before they get here.
pub async fn options() -> impl IntoResponse {
  StatusCode::OK
}

/// Any method a route does not support.
pub async fn method_not_allowed() -> ApiError {
  ApiError::MethodNotAllowed
}

/// Any path outside the API surface.
pub async fn not_found() -> ApiError {
  ApiError::NotFound
}
