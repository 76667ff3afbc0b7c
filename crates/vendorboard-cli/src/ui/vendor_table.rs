//! Comparison table pane with a detail strip for the selected vendor.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use vendorboard_core::{
  dashboard::VendorRecord,
  export::NOT_AVAILABLE,
  flags::{FlagKind, MissingData, VendorFlag},
  format::{format_currency, format_number},
  report::fields,
};

use crate::app::App;

pub const COLUMNS: [&str; 9] = [
  "Company",
  "Symbol",
  "Sector",
  "Market Cap",
  "Revenue (TTM)",
  "P/E Ratio",
  "Profit Margin",
  "ROE",
  "Flags",
];

/// Text cells for every column except Flags.
pub fn row_cells(record: &VendorRecord) -> [String; 8] {
  let text = |field: &str| {
    record
      .overview_text(field)
      .unwrap_or_else(|| NOT_AVAILABLE.to_string())
  };
  let overview = |field: &str| record.overview_text(field);

  [
    record.company_name(),
    record.symbol.clone(),
    text(fields::SECTOR),
    format_currency(overview(fields::MARKET_CAPITALIZATION).as_deref()),
    format_currency(overview(fields::REVENUE_TTM).as_deref()),
    text(fields::PE_RATIO),
    text(fields::PROFIT_MARGIN),
    text(fields::RETURN_ON_EQUITY_TTM),
  ]
}

pub fn flag_icon(kind: FlagKind) -> (&'static str, Color) {
  match kind {
    FlagKind::Warning => ("⚠", Color::Yellow),
    FlagKind::Danger => ("●", Color::Red),
    FlagKind::Success => ("✔", Color::Green),
  }
}

fn flags_line(record: &VendorRecord, missing: MissingData) -> Line<'static> {
  if record.fetch_error.is_some() {
    return Line::from(Span::styled("load failed", Style::default().fg(Color::Red)));
  }
  let spans: Vec<Span> = record
    .flags(missing)
    .into_iter()
    .map(|flag| {
      let (icon, color) = flag_icon(flag.kind);
      Span::styled(format!("{icon} "), Style::default().fg(color))
    })
    .collect();
  Line::from(spans)
}

/// Render the table and the detail strip into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(5), Constraint::Length(8)])
    .split(area);

  draw_table(f, rows[0], app);
  draw_detail(f, rows[1], app);
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Vendors ({}) ", app.records.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let body: Vec<Row> = app
    .records
    .iter()
    .map(|record| {
      let mut cells: Vec<Cell> = row_cells(record).into_iter().map(Cell::from).collect();
      cells.push(Cell::from(flags_line(record, app.missing)));
      let row = Row::new(cells);
      if record.fetch_error.is_some() {
        row.style(Style::default().fg(Color::DarkGray))
      } else {
        row
      }
    })
    .collect();

  let widths = [
    Constraint::Min(20),
    Constraint::Length(7),
    Constraint::Length(18),
    Constraint::Length(11),
    Constraint::Length(14),
    Constraint::Length(10),
    Constraint::Length(14),
    Constraint::Length(8),
    Constraint::Length(12),
  ];

  let mut state = TableState::default().with_selected(
    (!app.records.is_empty()).then_some(app.table_cursor),
  );

  f.render_stateful_widget(
    Table::new(body, widths)
      .header(header)
      .block(block)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}

/// Lines for the detail strip: secondary metrics, flag messages, load error.
pub fn detail_lines(record: &VendorRecord, missing: MissingData) -> Vec<Line<'static>> {
  let label = |s: &str| Span::styled(format!("{s}: "), Style::default().fg(Color::DarkGray));
  let text = |field: &str| {
    record
      .overview_text(field)
      .unwrap_or_else(|| NOT_AVAILABLE.to_string())
  };

  let mut lines = vec![
    Line::from(vec![
      Span::styled(
        format!("{} ({})", record.company_name(), record.symbol),
        Style::default().add_modifier(Modifier::BOLD),
      ),
      Span::raw("  "),
      Span::styled(text(fields::INDUSTRY), Style::default().fg(Color::DarkGray)),
    ]),
    Line::from(vec![
      label("EPS"),
      Span::raw(format_number(record.overview_text(fields::EPS).as_deref())),
      Span::raw("  "),
      label("Book Value"),
      Span::raw(format_number(record.overview_text(fields::BOOK_VALUE).as_deref())),
      Span::raw("  "),
      label("Dividend Yield"),
      Span::raw(text(fields::DIVIDEND_YIELD)),
      Span::raw("  "),
      label("Beta"),
      Span::raw(text(fields::BETA)),
      Span::raw("  "),
      label("52W"),
      Span::raw(format!("{} – {}", text(fields::WEEK_52_LOW), text(fields::WEEK_52_HIGH))),
    ]),
  ];

  if let Some(error) = &record.fetch_error {
    lines.push(Line::from(Span::styled(
      format!("Error: {error}"),
      Style::default().fg(Color::Red),
    )));
  }

  lines.extend(record.flags(missing).into_iter().map(|VendorFlag { kind, message }| {
    let (icon, color) = flag_icon(kind);
    Line::from(Span::styled(format!("{icon} {message}"), Style::default().fg(color)))
  }));

  lines
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let lines = match app.selected_record() {
    Some(record) => detail_lines(record, app.missing),
    None => vec![Line::from(Span::styled(
      "No vendor data loaded.",
      Style::default().fg(Color::DarkGray),
    ))],
  };

  f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use vendorboard_core::{
    flags::{HIGH_PE_RATIO, SMALL_MARKET_CAP},
    report::Report,
    vendor::Vendor,
  };

  use super::*;

  fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
  }

  #[test]
  fn loaded_row_is_formatted() {
    let vendor = Vendor::new("CE", "Celanese");
    let record = VendorRecord::loaded(
      &vendor,
      Report::new(json!({
        "Name": "Celanese Corporation",
        "Sector": "MANUFACTURING",
        "MarketCapitalization": "4200000000",
        "RevenueTTM": "10940000000",
        "PERatio": "None",
        "ProfitMargin": "0.183",
        "ReturnOnEquityTTM": "0.31",
      })),
      Report::new(json!({})),
    );

    assert_eq!(row_cells(&record), [
      "Celanese Corporation",
      "CE",
      "MANUFACTURING",
      "$4.2B",
      "$10.9B",
      "None",
      "0.183",
      "0.31",
    ]);
  }

  #[test]
  fn failed_row_falls_back_to_registry_name() {
    let record = VendorRecord::failed(&Vendor::new("LYB", "LyondellBasell"), "boom");
    let cells = row_cells(&record);
    assert_eq!(cells[0], "LyondellBasell");
    assert_eq!(cells[1], "LYB");
    assert!(cells[2..].iter().all(|c| c == "N/A"));
    assert_eq!(line_text(&flags_line(&record, MissingData::Skip)), "load failed");
  }

  #[test]
  fn detail_lists_flag_messages_and_error() {
    let vendor = Vendor::new("ST", "Sensata Technologies");
    let record = VendorRecord::loaded(
      &vendor,
      Report::new(json!({
        "MarketCapitalization": "4000000000",
        "RevenueTTM": "4050000000",
        "PERatio": "45",
        "EPS": "1.5",
      })),
      Report::new(json!({})),
    );
    let text: Vec<String> = detail_lines(&record, MissingData::Skip).iter().map(line_text).collect();
    assert!(text[1].contains("EPS: 1.5"));
    assert!(text.iter().any(|l| l.ends_with(SMALL_MARKET_CAP)));
    assert!(text.iter().any(|l| l.ends_with(HIGH_PE_RATIO)));

    let failed = VendorRecord::failed(&vendor, "OVERVIEW for ST → 500");
    let text: Vec<String> = detail_lines(&failed, MissingData::Skip).iter().map(line_text).collect();
    assert_eq!(text.len(), 3);
    assert_eq!(text[2], "Error: OVERVIEW for ST → 500");
  }
}
