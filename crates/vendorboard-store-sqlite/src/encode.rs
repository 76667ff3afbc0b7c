//! Encoding and decoding helpers between [`CacheEntry`] and the columns of
//! `vendor_data`.
//!
//! Timestamps are stored as Unix epoch milliseconds. Payloads are stored as
//! compact JSON text.

use chrono::{DateTime, Utc};
use vendorboard_core::{report::Report, store::CacheEntry};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_millis(dt: DateTime<Utc>) -> i64 { dt.timestamp_millis() }

pub fn decode_millis(key: &str, ms: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(ms).ok_or_else(|| Error::Timestamp(ms, key.to_owned()))
}

// ─── Payload ──────────────────────────────────────────────────────────────────

pub fn encode_payload(report: &Report) -> Result<String> {
  Ok(serde_json::to_string(report)?)
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// A `vendor_data` row as read from SQLite, before decoding.
///
/// Both value columns are nullable in the schema; a NULL payload decodes to a
/// JSON `null` report and a NULL timestamp to the epoch.
pub struct RawEntry {
  pub symbol_key: String,
  pub data:       Option<String>,
  pub timestamp:  Option<i64>,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<CacheEntry> {
    let payload = match self.data.as_deref() {
      Some(text) => serde_json::from_str(text)?,
      None => Report::new(serde_json::Value::Null),
    };
    let written_at = decode_millis(&self.symbol_key, self.timestamp.unwrap_or(0))?;
    Ok(CacheEntry { key: self.symbol_key, payload, written_at })
  }
}
