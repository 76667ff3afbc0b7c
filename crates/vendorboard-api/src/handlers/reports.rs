//! Handlers for `/api/vendor/{symbol}/…` report endpoints.
//!
//! | Method | Path | Upstream function |
//! |--------|------|-------------------|
//! | `GET`  | `/api/vendor/{symbol}/overview` | `OVERVIEW` |
//! | `GET`  | `/api/vendor/{symbol}/income` | `INCOME_STATEMENT` |
//! | `GET`  | `/api/vendor/{symbol}/balance` | `BALANCE_SHEET` |
//!
//! The symbol is not checked against the vendor registry; whatever the
//! upstream answers for it is passed through.

use axum::{
  Json,
  extract::{Path, State},
};
use vendorboard_core::{
  report::{Report, ReportKind},
  source::ReportSource,
  store::ReportStore,
};

use crate::{AppState, error::ApiError};

async fn report<S, U>(
  state: &AppState<S, U>,
  kind: ReportKind,
  symbol: &str,
) -> Result<Json<Report>, ApiError>
where
  S: ReportStore,
  U: ReportSource,
{
  let report = state.service.get_report(kind, symbol).await?;
  Ok(Json(report))
}

/// `GET /api/vendor/{symbol}/overview`
pub async fn overview<S, U>(
  State(state): State<AppState<S, U>>,
  Path(symbol): Path<String>,
) -> Result<Json<Report>, ApiError>
where
  S: ReportStore + 'static,
  U: ReportSource + 'static,
{
  report(&state, ReportKind::Overview, &symbol).await
}

/// `GET /api/vendor/{symbol}/income`
pub async fn income<S, U>(
  State(state): State<AppState<S, U>>,
  Path(symbol): Path<String>,
) -> Result<Json<Report>, ApiError>
where
  S: ReportStore + 'static,
  U: ReportSource + 'static,
{
  report(&state, ReportKind::IncomeStatement, &symbol).await
}

/// `GET /api/vendor/{symbol}/balance`
pub async fn balance<S, U>(
  State(state): State<AppState<S, U>>,
  Path(symbol): Path<String>,
) -> Result<Json<Report>, ApiError>
where
  S: ReportStore + 'static,
  U: ReportSource + 'static,
{
  report(&state, ReportKind::BalanceSheet, &symbol).await
}
