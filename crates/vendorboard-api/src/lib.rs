//! HTTP surface of the vendor dashboard.
//!
//! Exposes an axum [`Router`] serving the vendor registry and the cached
//! Alpha Vantage report proxy, backed by any [`ReportStore`] and
//! [`ReportSource`].
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/vendors` | Registry as `{symbol: name}` |
//! | `GET`  | `/api/vendor/{symbol}/overview` | Company overview |
//! | `GET`  | `/api/vendor/{symbol}/income` | Income statement |
//! | `GET`  | `/api/vendor/{symbol}/balance` | Balance sheet |
//!
//! Every route answers `OPTIONS` with an empty 200 and any other method with
//! a 405 JSON error. All responses carry permissive CORS headers.

pub mod config;
pub mod error;
pub mod handlers;

pub use config::ServerConfig;
pub use error::ApiError;

use std::sync::Arc;

use axum::{
  Router,
  http::{Method, header},
  routing::{MethodRouter, get},
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use vendorboard_core::{source::ReportSource, store::ReportStore, vendor::VendorRegistry};
use vendorboard_service::ReportService;

use handlers::{method_not_allowed, not_found, options, reports, vendors};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, U> {
  pub service: Arc<ReportService<S, U>>,
  pub vendors: Arc<VendorRegistry>,
}

impl<S, U> AppState<S, U> {
  pub fn new(service: ReportService<S, U>, vendors: VendorRegistry) -> Self {
    Self { service: Arc::new(service), vendors: Arc::new(vendors) }
  }
}

impl<S, U> Clone for AppState<S, U> {
  fn clone(&self) -> Self {
    Self { service: Arc::clone(&self.service), vendors: Arc::clone(&self.vendors) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API [`Router`].
pub fn router<S, U>(state: AppState<S, U>) -> Router
where
  S: ReportStore + 'static,
  U: ReportSource + 'static,
{
  Router::new()
    .route("/api/vendors",                  api_route(get(vendors::list::<S, U>)))
    .route("/api/vendor/{symbol}/overview", api_route(get(reports::overview::<S, U>)))
    .route("/api/vendor/{symbol}/income",   api_route(get(reports::income::<S, U>)))
    .route("/api/vendor/{symbol}/balance",  api_route(get(reports::balance::<S, U>)))
    .fallback(not_found)
    .layer(cors())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn api_route<St>(route: MethodRouter<St>) -> MethodRouter<St>
where
  St: Clone + Send + Sync + 'static,
{
  route.options(options).fallback(method_not_allowed)
}

fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE])
}

// ─── Tests ────────────────────────────────────────────────────────────────────
