//! `vendorboard` — terminal dashboard for the vendor report API.
//!
//! # Usage
//!
//! ```
//! vendorboard --url http://localhost:3001
//! vendorboard --config ~/.config/vendorboard/config.toml
//! vendorboard --export vendors.csv
//! ```

mod app;
mod client;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vendorboard_core::{dashboard::load_records, flags::MissingData};

const DEFAULT_URL: &str = "http://localhost:3001";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "vendorboard", about = "Terminal dashboard for vendor fundamentals")]
struct Args {
  /// Path to a TOML config file (url, missing_as_zero, export_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the vendorboard server (default: http://localhost:3001).
  #[arg(long, env = "VENDORBOARD_URL")]
  url: Option<String>,

  /// Write the comparison as CSV to FILE and exit without starting the UI.
  #[arg(long, value_name = "FILE")]
  export: Option<PathBuf>,

  /// Treat a missing metric as 0 when evaluating flags.
  #[arg(long)]
  missing_as_zero: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:             String,
  #[serde(default)]
  missing_as_zero: bool,
  /// Directory the `e` key writes CSV files to.
  #[serde(default)]
  export_dir:      Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };
  let missing = if args.missing_as_zero || file_cfg.missing_as_zero {
    MissingData::AsZero
  } else {
    MissingData::Skip
  };

  let client = ApiClient::new(api_config)?;

  if let Some(path) = args.export {
    return export(&client, &path).await;
  }

  let export_dir = file_cfg.export_dir.unwrap_or_else(|| PathBuf::from("."));
  let mut app = App::new(client, missing, export_dir);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Export mode ──────────────────────────────────────────────────────────────

/// Load every vendor once and write the CSV to `path`. Logs go to stderr.
async fn export(client: &ApiClient, path: &std::path::Path) -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let vendors = client.list_vendors().await?;
  let records = load_records(client, &vendors).await;
  for record in &records {
    if let Some(e) = &record.fetch_error {
      tracing::warn!(symbol = %record.symbol, error = %e, "vendor exported without data");
    }
  }

  app::write_csv(&records, path)?;
  tracing::info!(vendors = records.len(), "wrote {}", path.display());
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // The loading status is on screen; now do the slow part.
    if app.pending_refresh {
      app.refresh().await;
      continue;
    }

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          if !app.handle_key(key) {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
