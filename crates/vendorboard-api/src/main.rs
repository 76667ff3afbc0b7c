//! vendorboard API server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! persistent report store, and serves the report proxy over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vendorboard_api::{AppState, ServerConfig};
use vendorboard_service::{AlphaVantageClient, ReadThroughCache, ReportService};
use vendorboard_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Vendor dashboard API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let cached = store.row_count().await.context("failed to read report store")?;
  tracing::info!(cached, "opened report store at {store_path:?}");

  let upstream = AlphaVantageClient::new(server_cfg.upstream_config())
    .context("failed to build upstream client")?;
  if !upstream.has_api_key() {
    tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; every uncached report request will fail");
  }

  let service = ReportService::new(
    ReadThroughCache::new(store, server_cfg.cache_config()),
    upstream,
  );
  let state = AppState::new(service, server_cfg.vendors.clone());

  let app = vendorboard_api::router(state);
  let address = server_cfg.address();

  tracing::info!(vendors = server_cfg.vendors.len(), "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
