//! The report proxy: upstream client, two-tier read-through cache, and the
//! report service that composes them.
//!
//! ```text
//! ReportService::get_report
//!   └─ ReadThroughCache::get ── memory tier (moka, short TTL)
//!        │                   └─ ReportStore::get_fresh (persistent, 24 h window)
//!        └─ miss → ReportSource::fetch_report → ReadThroughCache::set
//! ```

pub mod cache;
pub mod error;
pub mod service;
pub mod upstream;

pub use cache::{CacheConfig, ReadThroughCache};
pub use error::ServiceError;
pub use service::ReportService;
pub use upstream::{AlphaVantageClient, UpstreamConfig};
