//! The `ReportSource` trait — the origin the cache falls back to.

use std::future::Future;

use crate::{
  error::FetchError,
  report::{Report, ReportKind},
};

/// Fetches one report from the upstream financial-data API.
///
/// Implementations perform exactly one outbound request per call and do no
/// caching or retrying of their own.
pub trait ReportSource: Send + Sync {
  fn fetch_report<'a>(
    &'a self,
    kind: ReportKind,
    symbol: &'a str,
  ) -> impl Future<Output = Result<Report, FetchError>> + Send + 'a;
}
