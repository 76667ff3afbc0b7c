//! Report kinds and the untyped report document.
//!
//! Upstream reports are passed through as opaque JSON. Only the handful of
//! fields the dashboard actually consumes get named accessors here; every
//! numeric accessor returns `None` when the field is absent, empty, one of
//! the upstream placeholders (`"None"`, `"-"`), or not a finite number.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Report kind ──────────────────────────────────────────────────────────────

/// The fixed set of upstream report functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
  Overview,
  IncomeStatement,
  BalanceSheet,
}

impl ReportKind {
  /// The upstream `function=` query value.
  pub fn function(self) -> &'static str {
    match self {
      ReportKind::Overview => "OVERVIEW",
      ReportKind::IncomeStatement => "INCOME_STATEMENT",
      ReportKind::BalanceSheet => "BALANCE_SHEET",
    }
  }

  /// Short name used both as the cache-key prefix and as the last path
  /// segment of `/api/vendor/{symbol}/{segment}`.
  pub fn segment(self) -> &'static str {
    match self {
      ReportKind::Overview => "overview",
      ReportKind::IncomeStatement => "income",
      ReportKind::BalanceSheet => "balance",
    }
  }

  /// Cache key for this report of `symbol`, e.g. `overview_TEL`.
  pub fn cache_key(self, symbol: &str) -> String {
    format!("{}_{symbol}", self.segment())
  }
}

impl fmt::Display for ReportKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.function())
  }
}

// ─── Field names ──────────────────────────────────────────────────────────────

/// Overview field names as the upstream spells them.
pub mod fields {
  pub const NAME: &str = "Name";
  pub const SECTOR: &str = "Sector";
  pub const INDUSTRY: &str = "Industry";
  pub const MARKET_CAPITALIZATION: &str = "MarketCapitalization";
  pub const REVENUE_TTM: &str = "RevenueTTM";
  pub const PE_RATIO: &str = "PERatio";
  pub const PROFIT_MARGIN: &str = "ProfitMargin";
  pub const RETURN_ON_EQUITY_TTM: &str = "ReturnOnEquityTTM";
  pub const RETURN_ON_ASSETS_TTM: &str = "ReturnOnAssetsTTM";
  pub const EPS: &str = "EPS";
  pub const BOOK_VALUE: &str = "BookValue";
  pub const DIVIDEND_YIELD: &str = "DividendYield";
  pub const WEEK_52_HIGH: &str = "52WeekHigh";
  pub const WEEK_52_LOW: &str = "52WeekLow";
  pub const BETA: &str = "Beta";

  pub const ANNUAL_REPORTS: &str = "annualReports";
  pub const FISCAL_DATE_ENDING: &str = "fiscalDateEnding";
  pub const TOTAL_REVENUE: &str = "totalRevenue";
}

// ─── Report ───────────────────────────────────────────────────────────────────

/// An upstream report document, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Value);

impl Report {
  pub fn new(value: Value) -> Self {
    Self(value)
  }

  pub fn as_value(&self) -> &Value {
    &self.0
  }

  /// Field rendered as display text. Strings are returned as-is, numbers and
  /// booleans are stringified, and empty strings count as absent.
  pub fn text(&self, field: &str) -> Option<String> {
    cell_text(self.0.get(field)?)
  }

  /// Field parsed as a finite number.
  pub fn number(&self, field: &str) -> Option<f64> {
    parse_number(self.0.get(field)?)
  }

  pub fn revenue_ttm(&self) -> Option<f64> {
    self.number(fields::REVENUE_TTM)
  }

  pub fn market_capitalization(&self) -> Option<f64> {
    self.number(fields::MARKET_CAPITALIZATION)
  }

  pub fn pe_ratio(&self) -> Option<f64> {
    self.number(fields::PE_RATIO)
  }

  pub fn profit_margin(&self) -> Option<f64> {
    self.number(fields::PROFIT_MARGIN)
  }

  pub fn return_on_equity(&self) -> Option<f64> {
    self.number(fields::RETURN_ON_EQUITY_TTM)
  }

  /// The `annualReports` array of an income statement, in upstream order
  /// (most recent first). Entries without a `fiscalDateEnding` are skipped.
  pub fn annual_revenues(&self) -> Vec<AnnualRevenue> {
    let Some(Value::Array(reports)) = self.0.get(fields::ANNUAL_REPORTS) else {
      return Vec::new();
    };
    reports
      .iter()
      .filter_map(|r| {
        let fiscal_date_ending = r
          .get(fields::FISCAL_DATE_ENDING)
          .and_then(cell_text)?;
        Some(AnnualRevenue {
          fiscal_date_ending,
          total_revenue: r.get(fields::TOTAL_REVENUE).and_then(parse_number),
        })
      })
      .collect()
  }
}

/// One year of an income statement, reduced to what the charts need.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRevenue {
  pub fiscal_date_ending: String,
  pub total_revenue:      Option<f64>,
}

fn cell_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if s.is_empty() => None,
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

fn parse_number(value: &Value) -> Option<f64> {
  let n = match value {
    Value::Number(n) => n.as_f64()?,
    Value::String(s) => parse_numeric_text(s)?,
    _ => return None,
  };
  n.is_finite().then_some(n)
}

/// Parse an upstream numeric string; the placeholders `None` and `-` are
/// treated as absent.
pub fn parse_numeric_text(s: &str) -> Option<f64> {
  let s = s.trim();
  if s.is_empty() || s == "None" || s == "-" {
    return None;
  }
  s.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn cache_keys_use_segment_prefix() {
    assert_eq!(ReportKind::Overview.cache_key("TEL"), "overview_TEL");
    assert_eq!(ReportKind::IncomeStatement.cache_key("ST"), "income_ST");
    assert_eq!(ReportKind::BalanceSheet.cache_key("DD"), "balance_DD");
  }

  #[test]
  fn numeric_accessors_treat_placeholders_as_absent() {
    let report = Report::new(json!({
      "RevenueTTM": "15000000000",
      "PERatio": "None",
      "MarketCapitalization": "-",
      "ProfitMargin": 0.12,
      "ReturnOnEquityTTM": "abc",
    }));
    assert_eq!(report.revenue_ttm(), Some(15_000_000_000.0));
    assert_eq!(report.pe_ratio(), None);
    assert_eq!(report.market_capitalization(), None);
    assert_eq!(report.profit_margin(), Some(0.12));
    assert_eq!(report.return_on_equity(), None);
  }

  #[test]
  fn text_skips_empty_strings() {
    let report = Report::new(json!({ "Name": "", "Sector": "TECHNOLOGY", "Beta": 1.2 }));
    assert_eq!(report.text("Name"), None);
    assert_eq!(report.text("Sector").as_deref(), Some("TECHNOLOGY"));
    assert_eq!(report.text("Beta").as_deref(), Some("1.2"));
    assert_eq!(report.text("Industry"), None);
  }

  #[test]
  fn annual_revenues_preserve_upstream_order() {
    let report = Report::new(json!({
      "annualReports": [
        { "fiscalDateEnding": "2024-09-30", "totalRevenue": "15845000000" },
        { "fiscalDateEnding": "2023-09-30", "totalRevenue": "None" },
        { "totalRevenue": "1" },
      ]
    }));
    let years = report.annual_revenues();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].fiscal_date_ending, "2024-09-30");
    assert_eq!(years[0].total_revenue, Some(15_845_000_000.0));
    assert_eq!(years[1].total_revenue, None);
  }

  #[test]
  fn report_serializes_transparently() {
    let value = json!({ "Symbol": "TEL", "Information": "rate limited" });
    let report = Report::new(value.clone());
    assert_eq!(serde_json::to_value(&report).unwrap(), value);
  }
}
