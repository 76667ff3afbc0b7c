//! SQL schema for the report cache.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per report-type + symbol key. Rows are overwritten, never deleted.
CREATE TABLE IF NOT EXISTS vendor_data (
    symbol_key  TEXT PRIMARY KEY,   -- e.g. 'overview_TEL'
    data        TEXT,               -- serialized JSON report
    timestamp   INTEGER             -- Unix epoch milliseconds of the write
);

PRAGMA user_version = 1;
";
