//! TUI rendering — orchestrates all panes.

pub mod vendor_charts;
pub mod vendor_table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph, Tabs},
};
use vendorboard_core::flags::MissingData;

use crate::app::{App, Tab};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, tab bar, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_tabs(f, rows[1], app);
  match app.tab {
    Tab::Table => vendor_table::draw(f, rows[2], app),
    Tab::Charts => vendor_charts::draw(f, rows[2], app),
  }
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " vendorboard  [r] refresh  [e] export  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let titles = [Tab::Table, Tab::Charts]
    .iter()
    .enumerate()
    .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));

  let selected = match app.tab {
    Tab::Table => 0,
    Tab::Charts => 1,
  };

  f.render_widget(
    Tabs::new(titles)
      .select(selected)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let mode_label = match app.missing {
    MissingData::Skip => "SKIP MISSING",
    MissingData::AsZero => "MISSING AS 0",
  };
  let hints = match app.tab {
    Tab::Table => "Tab/1/2 switch  ↑↓/jk select  r refresh  e export  q quit",
    Tab::Charts => "Tab/1/2 switch  r refresh  e export  q quit",
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

#[cfg(test)]
mod tests {
  use ratatui::{Terminal, backend::TestBackend};
  use serde_json::json;
  use vendorboard_core::{
    dashboard::VendorRecord,
    report::Report,
    vendor::Vendor,
  };

  use super::*;
  use crate::client::{ApiClient, ApiConfig};

  fn app_with_records() -> App {
    let client = ApiClient::new(ApiConfig { base_url: "http://127.0.0.1:9".into() }).unwrap();
    let mut app = App::new(client, MissingData::Skip, std::env::temp_dir());
    let tel = Vendor::new("TEL", "TE Connectivity");
    app.records = vec![
      VendorRecord::loaded(
        &tel,
        Report::new(json!({
          "Name": "TE Connectivity Ltd",
          "Sector": "TECHNOLOGY",
          "MarketCapitalization": "45234000000",
          "RevenueTTM": "15950000000",
          "ProfitMargin": "0.124",
          "ReturnOnEquityTTM": "0.19",
        })),
        Report::new(json!({
          "annualReports": [{ "fiscalDateEnding": "2023-09-30", "totalRevenue": "16034000000" }]
        })),
      ),
      VendorRecord::failed(&Vendor::new("DD", "DuPont"), "OVERVIEW for DD → 500"),
    ];
    app
  }

  fn rendered(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect()
  }

  #[test]
  fn table_tab_renders_rows() {
    let app = app_with_records();
    let screen = rendered(&app);
    assert!(screen.contains("Comparison Table"));
    assert!(screen.contains("TE Connectivity Ltd"));
    assert!(screen.contains("$45.2B"));
    assert!(screen.contains("DuPont"));
    assert!(screen.contains("load failed"));
  }

  #[test]
  fn charts_tab_renders_panes() {
    let mut app = app_with_records();
    app.tab = Tab::Charts;
    let screen = rendered(&app);
    assert!(screen.contains("Revenue vs Market Cap"));
    assert!(screen.contains("Profitability"));
    assert!(screen.contains("TECHNOLOGY"));
    assert!(screen.contains("2023-09-30"));
  }
}
