//! CSV export of the vendor comparison.
//!
//! Columns: Symbol, Company Name, Sector, Industry, Market Cap, Revenue (TTM),
//! P/E Ratio, Profit Margin, ROE, ROA, EPS, Book Value, Dividend Yield,
//! 52 Week High, 52 Week Low, Beta.
//!
//! Overview values are written verbatim; a missing one becomes `N/A`.

use chrono::NaiveDate;

use crate::{
  Error, Result,
  dashboard::VendorRecord,
  report::fields,
};

pub const NOT_AVAILABLE: &str = "N/A";

pub const HEADER: [&str; 16] = [
  "Symbol",
  "Company Name",
  "Sector",
  "Industry",
  "Market Cap",
  "Revenue (TTM)",
  "P/E Ratio",
  "Profit Margin",
  "ROE",
  "ROA",
  "EPS",
  "Book Value",
  "Dividend Yield",
  "52 Week High",
  "52 Week Low",
  "Beta",
];

/// Overview fields behind every column after Symbol and Company Name.
const OVERVIEW_COLUMNS: [&str; 14] = [
  fields::SECTOR,
  fields::INDUSTRY,
  fields::MARKET_CAPITALIZATION,
  fields::REVENUE_TTM,
  fields::PE_RATIO,
  fields::PROFIT_MARGIN,
  fields::RETURN_ON_EQUITY_TTM,
  fields::RETURN_ON_ASSETS_TTM,
  fields::EPS,
  fields::BOOK_VALUE,
  fields::DIVIDEND_YIELD,
  fields::WEEK_52_HIGH,
  fields::WEEK_52_LOW,
  fields::BETA,
];

/// One CSV row for `record`, in [`HEADER`] order.
pub fn row(record: &VendorRecord) -> Vec<String> {
  let mut cells = Vec::with_capacity(HEADER.len());
  cells.push(record.symbol.clone());
  cells.push(record.company_name());
  cells.extend(OVERVIEW_COLUMNS.iter().map(|field| {
    record
      .overview_text(field)
      .unwrap_or_else(|| NOT_AVAILABLE.to_string())
  }));
  cells
}

/// Render the header and one row per record.
pub fn export_csv(records: &[VendorRecord]) -> Result<String> {
  let mut wtr = csv::WriterBuilder::new()
    .quote_style(csv::QuoteStyle::Necessary)
    .from_writer(vec![]);

  wtr.write_record(HEADER)?;
  for record in records {
    wtr.write_record(row(record))?;
  }

  let bytes = wtr.into_inner().map_err(|e| Error::Csv(e.into_error().into()))?;
  String::from_utf8(bytes).map_err(|_| Error::CsvEncoding)
}

/// `vendor-comparison-YYYY-MM-DD.csv`
pub fn default_file_name(date: NaiveDate) -> String {
  format!("vendor-comparison-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{report::Report, vendor::Vendor};

  #[test]
  fn vendor_without_overview_renders_not_available() {
    let record = VendorRecord::failed(&Vendor::new("LYB", "LyondellBasell"), "timeout");
    let csv = export_csv(&[record]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER.join(","));

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 16);
    assert_eq!(fields[0], "LYB");
    assert_eq!(fields[1], "LyondellBasell");
    assert_eq!(fields.iter().filter(|f| **f == NOT_AVAILABLE).count(), 14);
    assert!(fields[3..].iter().all(|f| *f == NOT_AVAILABLE));
  }

  #[test]
  fn comma_fields_are_quoted() {
    let record = VendorRecord::loaded(
      &Vendor::new("TEL", "TE Connectivity"),
      Report::new(json!({
        "Name": "TE Connectivity Ltd",
        "Sector": "TECHNOLOGY",
        "Industry": "ELECTRONIC COMPONENTS, CONNECTORS",
        "MarketCapitalization": "45000000000",
        "PERatio": "14.2",
        "Beta": "1.13",
      })),
      Report::new(json!({})),
    );
    let csv = export_csv(&[record]).unwrap();
    let line = csv.lines().nth(1).unwrap();
    assert!(
      line.starts_with(
        "TEL,TE Connectivity Ltd,TECHNOLOGY,\"ELECTRONIC COMPONENTS, CONNECTORS\",45000000000,N/A,14.2,"
      ),
      "{line}"
    );
    assert!(line.ends_with(",1.13"), "{line}");
  }

  #[test]
  fn file_name_carries_the_date() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    assert_eq!(default_file_name(date), "vendor-comparison-2025-03-14.csv");
  }
}
