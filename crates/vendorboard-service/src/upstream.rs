//! Alpha Vantage client — the origin behind the cache.
//!
//! One request per call, no retry, no backoff. The request URL is
//! `{base_url}?function={FUNCTION}&symbol={symbol}&apikey={key}`.

use std::time::Duration;

use reqwest::{Client, Url};
use vendorboard_core::{
  FetchError,
  report::{Report, ReportKind},
  source::ReportSource,
};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Connection settings for the upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
  pub base_url: String,
  /// `None` or empty makes every fetch fail with a configuration error.
  pub api_key:  Option<String>,
  /// Whole-request timeout; `None` leaves the transport default in place.
  pub timeout:  Option<Duration>,
}

impl Default for UpstreamConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(), api_key: None, timeout: None }
  }
}

/// Async HTTP client for the Alpha Vantage `query` endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct AlphaVantageClient {
  client:   Client,
  base_url: String,
  api_key:  Option<String>,
}

impl std::fmt::Debug for AlphaVantageClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AlphaVantageClient")
      .field("base_url", &self.base_url)
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl AlphaVantageClient {
  pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|e| FetchError::Configuration(format!("failed to build HTTP client: {e}")))?;
    Ok(Self { client, base_url: config.base_url, api_key: config.api_key })
  }

  pub fn has_api_key(&self) -> bool {
    self.api_key.as_deref().is_some_and(|k| !k.is_empty())
  }

  fn url(&self, kind: ReportKind, symbol: &str) -> Result<Url, FetchError> {
    let api_key = self
      .api_key
      .as_deref()
      .filter(|k| !k.is_empty())
      .ok_or_else(|| {
        FetchError::Configuration("Alpha Vantage API key not configured".to_string())
      })?;

    Url::parse_with_params(
      &self.base_url,
      [("function", kind.function()), ("symbol", symbol), ("apikey", api_key)],
    )
    .map_err(|e| FetchError::Configuration(format!("invalid upstream base URL: {e}")))
  }
}

impl ReportSource for AlphaVantageClient {
  async fn fetch_report(&self, kind: ReportKind, symbol: &str) -> Result<Report, FetchError> {
    // Credential check happens here, before any network activity.
    let url = self.url(kind, symbol)?;

    tracing::info!(function = kind.function(), symbol, "fetching report from upstream");

    let fail = |e: reqwest::Error| {
      // Strip the URL: it carries the API key.
      let e = e.without_url();
      tracing::warn!(function = kind.function(), symbol, error = %e, "upstream fetch failed");
      FetchError::Upstream(format!("{} for {symbol}: {e}", kind.function()))
    };

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(fail)?
      .error_for_status()
      .map_err(fail)?;

    let value: serde_json::Value = response.json().await.map_err(fail)?;
    Ok(Report::new(value))
  }
}
