//! Two-tier read-through cache: a short-lived in-memory tier in front of a
//! persistent [`ReportStore`].
//!
//! The tiers may disagree transiently; `set` always leaves both holding the
//! same value for its key. Nothing is invalidated on external change, so
//! staleness is bounded only by the two windows.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use vendorboard_core::{
  report::Report,
  store::{CacheEntry, ReportStore},
};

/// Tuning for [`ReadThroughCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
  /// In-memory entries expire this long after insertion.
  pub memory_ttl:       Duration,
  /// Stored entries older than this read as absent.
  pub freshness_window: Duration,
  /// Upper bound on in-memory entries.
  pub memory_capacity:  u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      memory_ttl:       Duration::from_secs(300),
      freshness_window: Duration::from_secs(24 * 60 * 60),
      memory_capacity:  1024,
    }
  }
}

pub struct ReadThroughCache<S> {
  memory:           Cache<String, Report>,
  store:            S,
  freshness_window: Duration,
}

impl<S: ReportStore> ReadThroughCache<S> {
  pub fn new(store: S, config: CacheConfig) -> Self {
    let memory = Cache::builder()
      .max_capacity(config.memory_capacity)
      .time_to_live(config.memory_ttl)
      .build();
    Self { memory, store, freshness_window: config.freshness_window }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Memory tier first, then fresh stored entries. A stored hit is copied
  /// into memory. `None` means the caller has to go to the origin.
  pub async fn get(&self, key: &str) -> Result<Option<Report>, S::Error> {
    if let Some(report) = self.memory.get(key).await {
      tracing::debug!(key, "memory cache hit");
      return Ok(Some(report));
    }

    let Some(entry) = self.store.get_fresh(key, self.cutoff()).await? else {
      tracing::debug!(key, "cache miss");
      return Ok(None);
    };

    tracing::debug!(key, written_at = %entry.written_at, "store cache hit");
    self.memory.insert(key.to_owned(), entry.payload.clone()).await;
    Ok(Some(entry.payload))
  }

  /// Write both tiers, overwriting whatever either held for `key`.
  pub async fn set(&self, key: &str, report: Report) -> Result<(), S::Error> {
    self.memory.insert(key.to_owned(), report.clone()).await;
    self.store.upsert(CacheEntry::now(key, report)).await
  }

  fn cutoff(&self) -> DateTime<Utc> {
    chrono::Duration::from_std(self.freshness_window)
      .ok()
      .and_then(|window| Utc::now().checked_sub_signed(window))
      .unwrap_or(DateTime::<Utc>::MIN_UTC)
  }
}
