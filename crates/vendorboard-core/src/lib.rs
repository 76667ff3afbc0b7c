//! Core types and trait definitions for the vendor dashboard.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend, the upstream client, the API server and the dashboard
//! client all depend on it.

pub mod charts;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod flags;
pub mod format;
pub mod report;
pub mod source;
pub mod store;
pub mod vendor;

pub use error::{Error, FetchError, Result};
