//! Async HTTP client wrapping the vendorboard JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, Url};
use vendorboard_core::{
  dashboard::VendorFeed,
  report::{Report, ReportKind},
  vendor::VendorRegistry,
};

/// Connection settings for the vendorboard API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the vendorboard JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/vendors`
  pub async fn list_vendors(&self) -> Result<VendorRegistry> {
    let resp = self
      .client
      .get(self.url("/vendors"))
      .send()
      .await
      .context("GET /vendors failed")?;

    let resp = check_status(resp, "GET /vendors").await?;
    resp.json().await.context("deserialising vendors")
  }

  /// `/api/vendor/<symbol>/<segment>`, with the symbol percent-encoded as a
  /// single path segment.
  fn report_url(&self, kind: ReportKind, symbol: &str) -> Result<Url> {
    let mut url = Url::parse(&self.url("/vendor"))
      .with_context(|| format!("invalid server URL {:?}", self.config.base_url))?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("server URL {:?} cannot take a path", self.config.base_url))?
      .push(symbol)
      .push(kind.segment());
    Ok(url)
  }

  /// `GET /api/vendor/<symbol>/{overview,income,balance}`
  pub async fn get_report(&self, kind: ReportKind, symbol: &str) -> Result<Report> {
    let url = self.report_url(kind, symbol)?;
    let resp = self
      .client
      .get(url.clone())
      .send()
      .await
      .with_context(|| format!("GET {} failed", url.path()))?;

    let resp = check_status(resp, &format!("{kind} for {symbol}")).await?;
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {kind} for {symbol}"))
  }
}

/// Turn a non-2xx answer into an error carrying the server's `error` message.
async fn check_status(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<serde_json::Value>()
    .await
    .ok()
    .and_then(|body| body.get("error")?.as_str().map(str::to_owned));
  match message {
    Some(m) => Err(anyhow!("{what} → {status}: {m}")),
    None => Err(anyhow!("{what} → {status}")),
  }
}

impl VendorFeed for ApiClient {
  type Error = anyhow::Error;

  async fn report(&self, kind: ReportKind, symbol: &str) -> Result<Report> {
    self.get_report(kind, symbol).await
  }
}
