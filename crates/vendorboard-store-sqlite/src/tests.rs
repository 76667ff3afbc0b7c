//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use serde_json::json;
use vendorboard_core::{
  report::Report,
  store::{CacheEntry, ReportStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn overview(name: &str) -> Report {
  Report::new(json!({ "Symbol": "TEL", "Name": name, "PERatio": "14.2" }))
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_get_round_trips_payload() {
  let s = store().await;
  let entry = CacheEntry::now("overview_TEL", overview("TE Connectivity"));

  s.upsert(entry.clone()).await.unwrap();

  let fetched = s.get("overview_TEL").await.unwrap().expect("row");
  assert_eq!(fetched.key, "overview_TEL");
  assert_eq!(fetched.payload, entry.payload);
  // Millisecond precision on disk.
  assert_eq!(fetched.written_at.timestamp_millis(), entry.written_at.timestamp_millis());
}

#[tokio::test]
async fn second_upsert_overwrites_single_row() {
  let s = store().await;
  s.upsert(CacheEntry::now("overview_TEL", overview("v1"))).await.unwrap();
  s.upsert(CacheEntry::now("overview_TEL", overview("v2"))).await.unwrap();

  assert_eq!(s.row_count().await.unwrap(), 1);
  let fetched = s.get("overview_TEL").await.unwrap().unwrap();
  assert_eq!(fetched.payload, overview("v2"));
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.upsert(CacheEntry::now("overview_TEL", overview("a"))).await.unwrap();
  s.upsert(CacheEntry::now("income_TEL", Report::new(json!({ "annualReports": [] }))))
    .await
    .unwrap();

  assert_eq!(s.row_count().await.unwrap(), 2);
  assert!(s.get("balance_TEL").await.unwrap().is_none());
}

// ─── Freshness ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_fresh_returns_recent_rows() {
  let s = store().await;
  s.upsert(CacheEntry::now("overview_ST", overview("Sensata"))).await.unwrap();

  let cutoff = Utc::now() - Duration::hours(24);
  let fresh = s.get_fresh("overview_ST", cutoff).await.unwrap();
  assert!(fresh.is_some());
}

#[tokio::test]
async fn stale_row_is_ignored_but_kept() {
  let s = store().await;
  let stale = CacheEntry {
    key:        "overview_DD".into(),
    payload:    overview("DuPont"),
    written_at: Utc::now() - Duration::hours(25),
  };
  s.upsert(stale).await.unwrap();

  let cutoff = Utc::now() - Duration::hours(24);
  assert!(s.get_fresh("overview_DD", cutoff).await.unwrap().is_none());
  assert!(s.get("overview_DD").await.unwrap().is_some());
  assert_eq!(s.row_count().await.unwrap(), 1);
}

#[tokio::test]
async fn fresh_upsert_revives_stale_key() {
  let s = store().await;
  s.upsert(CacheEntry {
    key:        "overview_CE".into(),
    payload:    overview("old"),
    written_at: Utc::now() - Duration::days(3),
  })
  .await
  .unwrap();
  s.upsert(CacheEntry::now("overview_CE", overview("new"))).await.unwrap();

  let cutoff = Utc::now() - Duration::hours(24);
  let fresh = s.get_fresh("overview_CE", cutoff).await.unwrap().unwrap();
  assert_eq!(fresh.payload, overview("new"));
}

#[tokio::test]
async fn error_shaped_payload_is_stored_verbatim() {
  let s = store().await;
  let note = Report::new(json!({ "Information": "API rate limit reached" }));
  s.upsert(CacheEntry::now("overview_XYZ", note.clone())).await.unwrap();
  assert_eq!(s.get("overview_XYZ").await.unwrap().unwrap().payload, note);
}
