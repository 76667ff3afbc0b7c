//! Application state machine and event dispatcher.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vendorboard_core::{
  dashboard::{VendorRecord, load_records},
  export,
  flags::MissingData,
  vendor::VendorRegistry,
};

use crate::client::ApiClient;

// ─── Tab ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
  /// One row per vendor with formatted metrics and flags.
  Table,
  /// Bar charts, sector counts and revenue history.
  Charts,
}

impl Tab {
  pub fn title(self) -> &'static str {
    match self {
      Tab::Table => "Comparison Table",
      Tab::Charts => "Charts & Analytics",
    }
  }

  fn toggled(self) -> Self {
    match self {
      Tab::Table => Tab::Charts,
      Tab::Charts => Tab::Table,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Currently visible tab.
  pub tab: Tab,

  /// Vendors to load, as last reported by the server.
  pub vendors: VendorRegistry,

  /// One record per vendor from the most recent load.
  pub records: Vec<VendorRecord>,

  /// How flag rules treat a missing metric.
  pub missing: MissingData,

  /// Selected row in the comparison table.
  pub table_cursor: usize,

  /// Set by `r`; the event loop draws the loading status, then reloads.
  pub pending_refresh: bool,

  /// Directory CSV exports are written to.
  pub export_dir: PathBuf,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: ApiClient,
}

impl App {
  /// Create an [`App`] that loads on the first turn of the event loop.
  pub fn new(client: ApiClient, missing: MissingData, export_dir: PathBuf) -> Self {
    Self {
      tab: Tab::Table,
      vendors: VendorRegistry::default(),
      records: Vec::new(),
      missing,
      table_cursor: 0,
      pending_refresh: true,
      export_dir,
      status_msg: "Loading vendor data…".into(),
      client,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Refresh the vendor list, then load every vendor's reports.
  ///
  /// If the vendor list cannot be fetched the previous one is reused and the
  /// failure is shown in the status bar.
  pub async fn refresh(&mut self) {
    self.pending_refresh = false;

    let registry_error = match self.client.list_vendors().await {
      Ok(vendors) => {
        self.vendors = vendors;
        None
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to list vendors");
        Some(e)
      }
    };

    self.records = load_records(&self.client, &self.vendors).await;
    self.table_cursor = self.table_cursor.min(self.records.len().saturating_sub(1));

    self.status_msg = match registry_error {
      Some(e) => format!("Error: {e:#}"),
      None => load_summary(&self.records),
    };
  }

  // ── Export ────────────────────────────────────────────────────────────────

  /// Write the current records to `vendor-comparison-<date>.csv` in
  /// [`App::export_dir`].
  pub fn export(&self) -> anyhow::Result<PathBuf> {
    let path = self
      .export_dir
      .join(export::default_file_name(Local::now().date_naive()));
    write_csv(&self.records, &path)?;
    Ok(path)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab | KeyCode::BackTab => self.tab = self.tab.toggled(),
      KeyCode::Char('1') => self.tab = Tab::Table,
      KeyCode::Char('2') => self.tab = Tab::Charts,
      KeyCode::Char('r') => {
        self.pending_refresh = true;
        self.status_msg = "Loading vendor data…".into();
      }
      KeyCode::Char('e') => {
        self.status_msg = if self.records.is_empty() {
          "Nothing to export yet".into()
        } else {
          match self.export() {
            Ok(path) => format!("Exported {} vendors to {}", self.records.len(), path.display()),
            Err(e) => format!("Export failed: {e:#}"),
          }
        };
      }
      KeyCode::Down | KeyCode::Char('j') if self.tab == Tab::Table => {
        if self.table_cursor + 1 < self.records.len() {
          self.table_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') if self.tab == Tab::Table => {
        self.table_cursor = self.table_cursor.saturating_sub(1);
      }
      _ => {}
    }
    true
  }

  /// The record under the table cursor, if any.
  pub fn selected_record(&self) -> Option<&VendorRecord> {
    self.records.get(self.table_cursor)
  }
}

/// Render `records` as CSV and write them to `path`.
pub fn write_csv(records: &[VendorRecord], path: &Path) -> anyhow::Result<()> {
  let csv = export::export_csv(records).context("rendering CSV")?;
  std::fs::write(path, csv).with_context(|| format!("writing {}", path.display()))
}

fn load_summary(records: &[VendorRecord]) -> String {
  let failed: Vec<&str> = records
    .iter()
    .filter(|r| r.fetch_error.is_some())
    .map(|r| r.symbol.as_str())
    .collect();
  if failed.is_empty() {
    format!("Loaded {} vendors", records.len())
  } else {
    format!(
      "Loaded {} of {} vendors; failed: {}",
      records.len() - failed.len(),
      records.len(),
      failed.join(", ")
    )
  }
}
