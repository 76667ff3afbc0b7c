//! [`SqliteStore`] — the SQLite implementation of [`ReportStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use vendorboard_core::store::{CacheEntry, ReportStore};

use crate::{
  Result,
  encode::{RawEntry, encode_millis, encode_payload},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The persistent report cache, backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "report store ready");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of rows in `vendor_data`, stale ones included.
  pub async fn row_count(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM vendor_data", [], |row| row.get(0))?)
      })
      .await?;
    Ok(usize::try_from(count).unwrap_or_default())
  }

  async fn select(&self, key: &str, written_after: Option<i64>) -> Result<Option<CacheEntry>> {
    let key = key.to_owned();

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawEntry> {
          Ok(RawEntry {
            symbol_key: row.get(0)?,
            data:       row.get(1)?,
            timestamp:  row.get(2)?,
          })
        };
        let raw = match written_after {
          Some(after) => conn
            .query_row(
              "SELECT symbol_key, data, timestamp FROM vendor_data
               WHERE symbol_key = ?1 AND timestamp > ?2",
              rusqlite::params![key, after],
              map_row,
            )
            .optional()?,
          None => conn
            .query_row(
              "SELECT symbol_key, data, timestamp FROM vendor_data WHERE symbol_key = ?1",
              rusqlite::params![key],
              map_row,
            )
            .optional()?,
        };
        Ok(raw)
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }
}

// ─── ReportStore impl ────────────────────────────────────────────────────────

impl ReportStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert(&self, entry: CacheEntry) -> Result<()> {
    let data = encode_payload(&entry.payload)?;
    let timestamp = encode_millis(entry.written_at);
    let key = entry.key;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO vendor_data (symbol_key, data, timestamp) VALUES (?1, ?2, ?3)
           ON CONFLICT(symbol_key) DO UPDATE SET
             data      = excluded.data,
             timestamp = excluded.timestamp",
          rusqlite::params![key, data, timestamp],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
    self.select(key, None).await
  }

  async fn get_fresh(
    &self,
    key: &str,
    written_after: DateTime<Utc>,
  ) -> Result<Option<CacheEntry>> {
    self.select(key, Some(encode_millis(written_after))).await
  }
}
