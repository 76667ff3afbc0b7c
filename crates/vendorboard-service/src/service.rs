//! [`ReportService`] — one operation per report type, each reading through the
//! cache and falling back to the upstream source.

use vendorboard_core::{
  report::{Report, ReportKind},
  source::ReportSource,
  store::ReportStore,
};

use crate::{cache::ReadThroughCache, error::ServiceError};

pub struct ReportService<S, U> {
  cache:    ReadThroughCache<S>,
  upstream: U,
}

impl<S, U> ReportService<S, U>
where
  S: ReportStore,
  U: ReportSource,
{
  pub fn new(cache: ReadThroughCache<S>, upstream: U) -> Self {
    Self { cache, upstream }
  }

  pub fn cache(&self) -> &ReadThroughCache<S> {
    &self.cache
  }

  pub fn upstream(&self) -> &U {
    &self.upstream
  }

  /// Cached report for `symbol`, fetched from upstream on a miss.
  ///
  /// A hit never touches the upstream. On a miss the fetched report is written
  /// to both cache tiers before it is returned; a failed write is logged and
  /// the report is returned anyway. Fetch errors are not cached.
  pub async fn get_report(&self, kind: ReportKind, symbol: &str) -> Result<Report, ServiceError> {
    let key = kind.cache_key(symbol);

    if let Some(report) = self.cache.get(&key).await.map_err(ServiceError::store)? {
      return Ok(report);
    }

    let report = self.upstream.fetch_report(kind, symbol).await?;

    if let Err(e) = self.cache.set(&key, report.clone()).await {
      tracing::warn!(key = %key, error = %e, "failed to write report to cache");
    }

    Ok(report)
  }

  pub async fn overview(&self, symbol: &str) -> Result<Report, ServiceError> {
    self.get_report(ReportKind::Overview, symbol).await
  }

  pub async fn income(&self, symbol: &str) -> Result<Report, ServiceError> {
    self.get_report(ReportKind::IncomeStatement, symbol).await
  }

  pub async fn balance_sheet(&self, symbol: &str) -> Result<Report, ServiceError> {
    self.get_report(ReportKind::BalanceSheet, symbol).await
  }
}
