//! Per-vendor view records and the concurrent batch that builds them.

use std::{fmt::Display, future::Future};

use futures::future::{join, join_all};
use serde::Serialize;

use crate::{
  flags::{self, MissingData, VendorFlag},
  report::{Report, ReportKind, fields},
  vendor::{Vendor, VendorRegistry},
};

// ─── Record ───────────────────────────────────────────────────────────────────

/// Everything the presentation layer needs about one vendor.
///
/// Built fresh on every dashboard load and discarded on the next refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorRecord {
  pub symbol:       String,
  pub display_name: String,
  pub overview:     Option<Report>,
  pub income:       Option<Report>,
  pub fetch_error:  Option<String>,
}

impl VendorRecord {
  pub fn loaded(vendor: &Vendor, overview: Report, income: Report) -> Self {
    Self {
      symbol:       vendor.symbol.clone(),
      display_name: vendor.name.clone(),
      overview:     Some(overview),
      income:       Some(income),
      fetch_error:  None,
    }
  }

  pub fn failed(vendor: &Vendor, error: impl Into<String>) -> Self {
    Self {
      symbol:       vendor.symbol.clone(),
      display_name: vendor.name.clone(),
      overview:     None,
      income:       None,
      fetch_error:  Some(error.into()),
    }
  }

  /// The upstream company name, falling back to the registry name.
  pub fn company_name(&self) -> String {
    self
      .overview_text(fields::NAME)
      .unwrap_or_else(|| self.display_name.clone())
  }

  /// A text field of the overview, if the overview is present and has it.
  pub fn overview_text(&self, field: &str) -> Option<String> {
    self.overview.as_ref()?.text(field)
  }

  /// Flags for this vendor; a vendor without an overview has none.
  pub fn flags(&self, missing: MissingData) -> Vec<VendorFlag> {
    self
      .overview
      .as_ref()
      .map(|o| flags::evaluate(o, missing))
      .unwrap_or_default()
  }
}

// ─── Batch load ───────────────────────────────────────────────────────────────

/// Anything that can hand out reports for a symbol, e.g. the HTTP API client.
pub trait VendorFeed: Send + Sync {
  type Error: Display + Send;

  fn report<'a>(
    &'a self,
    kind: ReportKind,
    symbol: &'a str,
  ) -> impl Future<Output = Result<Report, Self::Error>> + Send + 'a;
}

/// Load overview and income for every vendor concurrently.
///
/// Returns one record per vendor in registry order once every fetch has
/// finished. A failing vendor gets its error recorded; the others are not
/// cancelled or affected.
pub async fn load_records<F: VendorFeed>(
  feed: &F,
  vendors: &VendorRegistry,
) -> Vec<VendorRecord> {
  let loads = vendors.iter().map(|vendor| async move {
    let (overview, income) = join(
      feed.report(ReportKind::Overview, &vendor.symbol),
      feed.report(ReportKind::IncomeStatement, &vendor.symbol),
    )
    .await;

    match (overview, income) {
      (Ok(overview), Ok(income)) => VendorRecord::loaded(vendor, overview, income),
      (Err(e), _) | (_, Err(e)) => VendorRecord::failed(vendor, e.to_string()),
    }
  });

  join_all(loads).await
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use serde_json::json;

  use super::*;

  struct FakeFeed {
    failing: &'static str,
    calls:   AtomicUsize,
    seen:    Mutex<Vec<String>>,
  }

  impl VendorFeed for FakeFeed {
    type Error = String;

    async fn report(&self, kind: ReportKind, symbol: &str) -> Result<Report, String> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.seen.lock().unwrap().push(kind.cache_key(symbol));
      if symbol == self.failing && kind == ReportKind::IncomeStatement {
        return Err(format!("Failed to fetch income for {symbol}"));
      }
      Ok(Report::new(json!({ "Symbol": symbol, "kind": kind.segment() })))
    }
  }

  #[tokio::test]
  async fn one_failure_does_not_abort_the_batch() {
    let feed = FakeFeed {
      failing: "DD",
      calls:   AtomicUsize::new(0),
      seen:    Mutex::new(Vec::new()),
    };
    let registry = VendorRegistry::default();

    let records = load_records(&feed, &registry).await;

    assert_eq!(records.len(), 5);
    let symbols: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["TEL", "ST", "DD", "CE", "LYB"]);

    let dd = &records[2];
    assert_eq!(dd.fetch_error.as_deref(), Some("Failed to fetch income for DD"));
    assert!(dd.overview.is_none() && dd.income.is_none());
    assert_eq!(dd.display_name, "DuPont de Nemours");

    for r in records.iter().filter(|r| r.symbol != "DD") {
      assert!(r.fetch_error.is_none(), "{} errored", r.symbol);
      assert!(r.overview.is_some() && r.income.is_some());
    }

    // Both fetches ran for every vendor, the failing one included.
    assert_eq!(feed.calls.load(Ordering::SeqCst), 10);
    assert!(feed.seen.lock().unwrap().contains(&"overview_DD".to_string()));
  }

  #[test]
  fn company_name_falls_back_to_registry_name() {
    let vendor = Vendor::new("CE", "Celanese");
    let failed = VendorRecord::failed(&vendor, "boom");
    assert_eq!(failed.company_name(), "Celanese");
    assert!(failed.flags(MissingData::AsZero).is_empty());

    let loaded = VendorRecord::loaded(
      &vendor,
      Report::new(json!({ "Name": "Celanese Corporation" })),
      Report::new(json!({})),
    );
    assert_eq!(loaded.company_name(), "Celanese Corporation");
  }
}
