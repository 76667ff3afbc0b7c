//! Charts & Analytics pane.
//!
//! ```text
//! ┌ Revenue vs Market Cap ──┐┌ Profitability ──────────┐
//! │ grouped bars per vendor ││ grouped bars per vendor │
//! └─────────────────────────┘└─────────────────────────┘
//! ┌ Sectors ────────────────┐┌ Revenue History ────────┐
//! │ sector  count           ││ year × vendor table     │
//! └─────────────────────────┘└─────────────────────────┘
//! ```

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
};
use vendorboard_core::charts::{
  self, ProfitabilityPoint, RevenuePoint, RevenueYear, SectorSlice,
};

use crate::app::App;

const FIRST_SERIES: Color = Color::Cyan;
const SECOND_SERIES: Color = Color::Magenta;

/// Render all four charts into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
    .split(area);
  let top = halves(rows[0]);
  let bottom = halves(rows[1]);

  draw_revenue(f, top[0], &charts::revenue_vs_market_cap(&app.records));
  draw_profitability(f, top[1], &charts::profitability(&app.records));
  draw_sectors(f, bottom[0], &charts::sector_distribution(&app.records));
  draw_history(f, bottom[1], &charts::revenue_history(&app.records));
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area)
}

fn pane(title: &str) -> Block<'static> {
  Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

fn legend(first: &str, second: &str) -> String {
  format!("■ {first}  ■ {second}")
}

fn no_data(f: &mut Frame, area: Rect, block: Block) {
  f.render_widget(
    Paragraph::new(Span::styled("No data", Style::default().fg(Color::DarkGray))).block(block),
    area,
  );
}

/// A bar whose height keeps one decimal of `value`; negative values draw flat.
pub fn bar(value: f64, color: Color) -> Bar<'static> {
  Bar::default()
    .value((value * 10.0).round().max(0.0) as u64)
    .text_value(format!("{value:.1}"))
    .style(Style::default().fg(color))
    .value_style(Style::default().fg(Color::Black).bg(color))
}

fn grouped_chart<'a>(block: Block<'a>, groups: Vec<BarGroup<'a>>) -> BarChart<'a> {
  let mut chart = BarChart::default()
    .block(block)
    .bar_width(6)
    .bar_gap(1)
    .group_gap(3);
  for group in groups {
    chart = chart.data(group);
  }
  chart
}

fn draw_revenue(f: &mut Frame, area: Rect, points: &[RevenuePoint]) {
  let block = pane("Revenue vs Market Cap ($B)")
    .title_bottom(legend("Revenue", "Market Cap"));
  if points.is_empty() {
    return no_data(f, area, block);
  }
  let groups = points
    .iter()
    .map(|p| {
      BarGroup::default()
        .label(Line::from(p.symbol.clone()))
        .bars(&[
          bar(p.revenue_billions, FIRST_SERIES),
          bar(p.market_cap_billions, SECOND_SERIES),
        ])
    })
    .collect();
  f.render_widget(grouped_chart(block, groups), area);
}

fn draw_profitability(f: &mut Frame, area: Rect, points: &[ProfitabilityPoint]) {
  let block = pane("Profitability (%)").title_bottom(legend("Profit Margin", "ROE"));
  if points.is_empty() {
    return no_data(f, area, block);
  }
  let groups = points
    .iter()
    .map(|p| {
      BarGroup::default()
        .label(Line::from(p.symbol.clone()))
        .bars(&[
          bar(p.profit_margin_pct, FIRST_SERIES),
          bar(p.roe_pct, SECOND_SERIES),
        ])
    })
    .collect();
  f.render_widget(grouped_chart(block, groups), area);
}

fn draw_sectors(f: &mut Frame, area: Rect, slices: &[SectorSlice]) {
  let block = pane("Sectors");
  if slices.is_empty() {
    return no_data(f, area, block);
  }
  let lines: Vec<Line> = slices
    .iter()
    .map(|s| {
      Line::from(vec![
        Span::raw(format!("{:<24}", s.sector)),
        Span::styled("█".repeat(s.count), Style::default().fg(FIRST_SERIES)),
        Span::raw(format!(" {}", s.count)),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Vendor columns of the history table, in first-seen order.
pub fn history_symbols(years: &[RevenueYear]) -> Vec<String> {
  let mut symbols: Vec<String> = Vec::new();
  for year in years {
    for symbol in year.revenue_billions.keys() {
      if !symbols.contains(symbol) {
        symbols.push(symbol.clone());
      }
    }
  }
  symbols
}

fn draw_history(f: &mut Frame, area: Rect, years: &[RevenueYear]) {
  let block = pane("Revenue History ($B)");
  if years.is_empty() {
    return no_data(f, area, block);
  }
  let symbols = history_symbols(years);

  let header = Row::new(
    std::iter::once("Year".to_string())
      .chain(symbols.iter().cloned())
      .map(Cell::from),
  )
  .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = years
    .iter()
    .map(|year| {
      let cells = std::iter::once(year.fiscal_date_ending.clone()).chain(symbols.iter().map(|s| {
        year
          .revenue_billions
          .get(s)
          .map_or_else(|| "–".to_string(), |b| format!("{b:.1}"))
      }));
      Row::new(cells.map(Cell::from))
    })
    .collect();

  let widths = std::iter::once(Constraint::Length(12))
    .chain(symbols.iter().map(|_| Constraint::Length(8)));

  f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  #[test]
  fn negative_values_draw_flat_but_keep_label() {
    let b = bar(-4.25, FIRST_SERIES);
    let shown = format!("{b:?}");
    assert!(shown.contains("-4.2") || shown.contains("-4.3"), "{shown}");
    assert!(shown.contains("value: 0"), "{shown}");
  }

  #[test]
  fn history_columns_cover_every_vendor_once() {
    let year = |date: &str, entries: &[(&str, f64)]| RevenueYear {
      fiscal_date_ending: date.to_string(),
      revenue_billions:   entries
        .iter()
        .map(|(s, v)| (s.to_string(), *v))
        .collect::<BTreeMap<_, _>>(),
    };
    let years = [
      year("2022-12-31", &[("TEL", 16.3)]),
      year("2023-12-31", &[("ST", 4.1), ("TEL", 16.0)]),
    ];
    assert_eq!(history_symbols(&years), ["TEL", "ST"]);
  }
}
