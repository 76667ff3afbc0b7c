//! The `ReportStore` trait — the persistent tier behind the read-through
//! cache.
//!
//! The trait is implemented by storage backends (e.g.
//! `vendorboard-store-sqlite`). The cache depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::report::Report;

/// A stored report payload and the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
  /// Report-type + symbol key, e.g. `overview_TEL`.
  pub key:        String,
  pub payload:    Report,
  pub written_at: DateTime<Utc>,
}

impl CacheEntry {
  /// An entry stamped with the current time.
  pub fn now(key: impl Into<String>, payload: Report) -> Self {
    Self { key: key.into(), payload, written_at: Utc::now() }
  }
}

/// Keyed storage of report payloads.
///
/// At most one entry exists per key. Entries are never deleted; a stale entry
/// is simply superseded by the next upsert for its key.
pub trait ReportStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or overwrite the entry for `entry.key`. Last write wins.
  fn upsert(
    &self,
    entry: CacheEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Point lookup regardless of age.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<CacheEntry>, Self::Error>> + Send + 'a;

  /// Point lookup restricted to entries written strictly after
  /// `written_after`. Older entries read as `None` but stay in storage.
  fn get_fresh<'a>(
    &'a self,
    key: &'a str,
    written_after: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<CacheEntry>, Self::Error>> + Send + 'a;
}
