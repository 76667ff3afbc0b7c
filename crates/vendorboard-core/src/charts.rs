//! Chart series derived from vendor records.
//!
//! The series are plain data; drawing them is the presentation layer's job.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{dashboard::VendorRecord, report::fields};

const BILLION: f64 = 1_000_000_000.0;
const HISTORY_YEARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
  pub symbol:              String,
  pub revenue_billions:    f64,
  pub market_cap_billions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityPoint {
  pub symbol:            String,
  pub profit_margin_pct: f64,
  pub roe_pct:           f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorSlice {
  pub sector: String,
  pub count:  usize,
}

/// Revenue of every vendor for one fiscal year, in billions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueYear {
  pub fiscal_date_ending: String,
  pub revenue_billions:   BTreeMap<String, f64>,
}

/// Revenue (TTM) against market cap, for vendors that report a revenue.
pub fn revenue_vs_market_cap(records: &[VendorRecord]) -> Vec<RevenuePoint> {
  records
    .iter()
    .filter_map(|r| {
      let overview = r.overview.as_ref()?;
      overview.text(fields::REVENUE_TTM)?;
      Some(RevenuePoint {
        symbol:              r.symbol.clone(),
        revenue_billions:    overview.revenue_ttm().unwrap_or(0.0) / BILLION,
        market_cap_billions: overview.market_capitalization().unwrap_or(0.0) / BILLION,
      })
    })
    .collect()
}

/// Profit margin and return on equity as percentages, for vendors that
/// report both.
pub fn profitability(records: &[VendorRecord]) -> Vec<ProfitabilityPoint> {
  records
    .iter()
    .filter_map(|r| {
      let overview = r.overview.as_ref()?;
      overview.text(fields::PROFIT_MARGIN)?;
      overview.text(fields::RETURN_ON_EQUITY_TTM)?;
      Some(ProfitabilityPoint {
        symbol:            r.symbol.clone(),
        profit_margin_pct: overview.profit_margin().unwrap_or(0.0) * 100.0,
        roe_pct:           overview.return_on_equity().unwrap_or(0.0) * 100.0,
      })
    })
    .collect()
}

/// Number of vendors per sector, sectors in first-seen order.
pub fn sector_distribution(records: &[VendorRecord]) -> Vec<SectorSlice> {
  let mut slices: Vec<SectorSlice> = Vec::new();
  for sector in records.iter().filter_map(|r| r.overview_text(fields::SECTOR)) {
    match slices.iter_mut().find(|s| s.sector == sector) {
      Some(slice) => slice.count += 1,
      None => slices.push(SectorSlice { sector, count: 1 }),
    }
  }
  slices
}

/// The three most recent annual revenues of every vendor, merged by fiscal
/// year and sorted oldest first. A missing revenue counts as zero.
pub fn revenue_history(records: &[VendorRecord]) -> Vec<RevenueYear> {
  let mut years: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
  for record in records {
    let Some(income) = record.income.as_ref() else { continue };
    for year in income.annual_revenues().into_iter().take(HISTORY_YEARS) {
      years
        .entry(year.fiscal_date_ending)
        .or_default()
        .insert(record.symbol.clone(), year.total_revenue.unwrap_or(0.0) / BILLION);
    }
  }
  years
    .into_iter()
    .map(|(fiscal_date_ending, revenue_billions)| RevenueYear {
      fiscal_date_ending,
      revenue_billions,
    })
    .collect()
}
