//! Qualitative flags derived from a vendor's overview report.
//!
//! Rules are evaluated in a fixed order, which is also the display order:
//!
//! | # | Condition | Kind | Message |
//! |---|-----------|------|---------|
//! | 1 | revenue < $1B | warning | Low Revenue (<$1B) |
//! | 2 | market cap < $5B | warning | Small Market Cap (<$5B) |
//! | 3 | P/E > 30 | danger | High P/E Ratio (>30) |
//! | 4 | revenue > $10B and P/E < 20 | success | Strong Fundamentals |

use serde::{Deserialize, Serialize};

use crate::report::Report;

pub const LOW_REVENUE: &str = "Low Revenue (<$1B)";
pub const SMALL_MARKET_CAP: &str = "Small Market Cap (<$5B)";
pub const HIGH_PE_RATIO: &str = "High P/E Ratio (>30)";
pub const STRONG_FUNDAMENTALS: &str = "Strong Fundamentals";

const LOW_REVENUE_THRESHOLD: f64 = 1_000_000_000.0;
const SMALL_MARKET_CAP_THRESHOLD: f64 = 5_000_000_000.0;
const HIGH_PE_THRESHOLD: f64 = 30.0;
const STRONG_REVENUE_THRESHOLD: f64 = 10_000_000_000.0;
const STRONG_PE_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
  Warning,
  Danger,
  Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorFlag {
  pub kind:    FlagKind,
  pub message: &'static str,
}

/// How a missing or non-numeric metric takes part in a threshold rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingData {
  /// A rule that reads a missing metric does not fire.
  #[default]
  Skip,
  /// A missing metric reads as `0`, so absent revenue or market cap raises
  /// the corresponding warning.
  AsZero,
}

impl MissingData {
  fn resolve(self, metric: Option<f64>) -> Option<f64> {
    match self {
      MissingData::Skip => metric,
      MissingData::AsZero => Some(metric.unwrap_or(0.0)),
    }
  }
}

/// Flags for an overview report, in display order.
pub fn evaluate(overview: &Report, missing: MissingData) -> Vec<VendorFlag> {
  let revenue = missing.resolve(overview.revenue_ttm());
  let market_cap = missing.resolve(overview.market_capitalization());
  let pe_ratio = missing.resolve(overview.pe_ratio());

  let mut flags = Vec::new();

  if revenue.is_some_and(|r| r < LOW_REVENUE_THRESHOLD) {
    flags.push(VendorFlag { kind: FlagKind::Warning, message: LOW_REVENUE });
  }
  if market_cap.is_some_and(|m| m < SMALL_MARKET_CAP_THRESHOLD) {
    flags.push(VendorFlag { kind: FlagKind::Warning, message: SMALL_MARKET_CAP });
  }
  if pe_ratio.is_some_and(|pe| pe > HIGH_PE_THRESHOLD) {
    flags.push(VendorFlag { kind: FlagKind::Danger, message: HIGH_PE_RATIO });
  }
  if let (Some(r), Some(pe)) = (revenue, pe_ratio)
    && r > STRONG_REVENUE_THRESHOLD
    && pe < STRONG_PE_THRESHOLD
  {
    flags.push(VendorFlag { kind: FlagKind::Success, message: STRONG_FUNDAMENTALS });
  }

  flags
}
