//! Handler for `GET /api/vendors`.

use axum::{Json, extract::State};
use vendorboard_core::{source::ReportSource, store::ReportStore, vendor::VendorRegistry};

use crate::AppState;

/// `GET /api/vendors` — `{"TEL": "TE Connectivity", ...}` in registry order.
pub async fn list<S, U>(State(state): State<AppState<S, U>>) -> Json<VendorRegistry>
where
  S: ReportStore + 'static,
  U: ReportSource + 'static,
{
  Json(state.vendors.as_ref().clone())
}
