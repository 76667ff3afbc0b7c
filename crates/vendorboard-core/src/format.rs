//! Compact number formatting for table cells (`$45.2B`, `1.3M`).

use crate::{export::NOT_AVAILABLE, report::parse_numeric_text};

const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Format an upstream numeric string as compact US-dollar currency.
pub fn format_currency(value: Option<&str>) -> String {
  match value.and_then(parse_numeric_text) {
    Some(n) if n < 0.0 => format!("-${}", compact(-n)),
    Some(n) => format!("${}", compact(n)),
    None => NOT_AVAILABLE.to_string(),
  }
}

/// Format an upstream numeric string in compact notation.
pub fn format_number(value: Option<&str>) -> String {
  match value.and_then(parse_numeric_text) {
    Some(n) if n < 0.0 => format!("-{}", compact(-n)),
    Some(n) => compact(n),
    None => NOT_AVAILABLE.to_string(),
  }
}

/// `n` must be non-negative. At most one fractional digit, `.0` dropped.
fn compact(n: f64) -> String {
  for (i, (scale, suffix)) in UNITS.iter().enumerate() {
    if n >= *scale {
      let scaled = round_one(n / scale);
      // 999.96B rounds to 1000B; promote to the next unit up.
      if scaled >= 1000.0 && i > 0 {
        let (bigger, bigger_suffix) = UNITS[i - 1];
        return format!("{}{bigger_suffix}", trim(round_one(n / bigger)));
      }
      return format!("{}{suffix}", trim(scaled));
    }
  }
  trim(round_one(n))
}

fn round_one(n: f64) -> f64 {
  (n * 10.0).round() / 10.0
}

fn trim(n: f64) -> String {
  let s = format!("{n:.1}");
  s.strip_suffix(".0").map(str::to_owned).unwrap_or(s)
}
