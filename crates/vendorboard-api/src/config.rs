//! Server configuration, layered from `config.toml` and the environment.
//!
//! Precedence, lowest first: built-in defaults, the config file,
//! `VENDORBOARD_*` variables, then the bare `ALPHA_VANTAGE_API_KEY` and
//! `PORT` variables.

use std::{path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;
use vendorboard_core::vendor::VendorRegistry;
use vendorboard_service::{CacheConfig, UpstreamConfig, upstream::DEFAULT_BASE_URL};

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  #[serde(default = "default_store_path")]
  pub store_path:            PathBuf,
  #[serde(default)]
  pub alpha_vantage_api_key: Option<String>,
  #[serde(default = "default_upstream_base_url")]
  pub upstream_base_url:     String,
  #[serde(default)]
  pub upstream_timeout_secs: Option<u64>,
  #[serde(default = "default_memory_ttl_secs")]
  pub memory_ttl_secs:       u64,
  #[serde(default = "default_freshness_window_secs")]
  pub freshness_window_secs: u64,
  #[serde(default = "default_memory_capacity")]
  pub memory_capacity:       u64,
  #[serde(default)]
  pub vendors:               VendorRegistry,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }
fn default_store_path() -> PathBuf { PathBuf::from("vendors.db") }
fn default_upstream_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_memory_ttl_secs() -> u64 { 300 }
fn default_freshness_window_secs() -> u64 { 24 * 60 * 60 }
fn default_memory_capacity() -> u64 { 1024 }

impl ServerConfig {
  /// Load the layered configuration. A missing file is not an error.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("VENDORBOARD"))
      .set_override_option("alpha_vantage_api_key", std::env::var("ALPHA_VANTAGE_API_KEY").ok())?
      .set_override_option("port", std::env::var("PORT").ok())?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }

  pub fn upstream_config(&self) -> UpstreamConfig {
    UpstreamConfig {
      base_url: self.upstream_base_url.clone(),
      api_key:  self.alpha_vantage_api_key.clone(),
      timeout:  self.upstream_timeout_secs.map(Duration::from_secs),
    }
  }

  pub fn cache_config(&self) -> CacheConfig {
    CacheConfig {
      memory_ttl:       Duration::from_secs(self.memory_ttl_secs),
      freshness_window: Duration::from_secs(self.freshness_window_secs),
      memory_capacity:  self.memory_capacity,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use config::{Config, File, FileFormat};

  use super::*;

  /// Serialises tests that mutate the process environment.
  static ENV_LOCK: Mutex<()> = Mutex::new(());

  const ENV_KEYS: [&str; 4] =
    ["VENDORBOARD_PORT", "VENDORBOARD_STORE_PATH", "PORT", "ALPHA_VANTAGE_API_KEY"];

  fn set_env(key: &str, value: &str) {
    // SAFETY: every test touching the environment holds ENV_LOCK.
    unsafe { std::env::set_var(key, value) }
  }

  fn clear_env() {
    for key in ENV_KEYS {
      // SAFETY: as above.
      unsafe { std::env::remove_var(key) }
    }
  }

  fn from_toml(toml: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "0.0.0.0:3001");
    assert_eq!(cfg.store_path, PathBuf::from("vendors.db"));
    assert!(cfg.alpha_vantage_api_key.is_none());
    assert_eq!(cfg.upstream_base_url, DEFAULT_BASE_URL);

    let cache = cfg.cache_config();
    assert_eq!(cache.memory_ttl, Duration::from_secs(300));
    assert_eq!(cache.freshness_window, Duration::from_secs(86_400));
    assert_eq!(cfg.upstream_config().timeout, None);

    let symbols: Vec<_> = cfg.vendors.iter().map(|v| v.symbol.as_str()).collect();
    assert_eq!(symbols, ["TEL", "ST", "DD", "CE", "LYB"]);
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        port = 8080
        store_path = "/var/lib/vendorboard/cache.db"
        alpha_vantage_api_key = "demo"
        upstream_timeout_secs = 15
        memory_ttl_secs = 60

        [[vendors]]
        symbol = "IBM"
        name = "International Business Machines"

        [[vendors]]
        symbol = "AAPL"
        name = "Apple"
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/vendorboard/cache.db"));

    let upstream = cfg.upstream_config();
    assert_eq!(upstream.api_key.as_deref(), Some("demo"));
    assert_eq!(upstream.timeout, Some(Duration::from_secs(15)));
    assert_eq!(cfg.cache_config().memory_ttl, Duration::from_secs(60));

    assert_eq!(cfg.vendors.len(), 2);
    assert_eq!(cfg.vendors.name_of("AAPL"), Some("Apple"));
  }

  #[test]
  fn load_layers_file_then_prefixed_env_then_bare_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let path = std::env::temp_dir().join(format!("vendorboard-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "port = 8080\nstore_path = \"file.db\"\nalpha_vantage_api_key = \"filekey\"\nmemory_ttl_secs = 60\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("file.db"));
    assert_eq!(cfg.alpha_vantage_api_key.as_deref(), Some("filekey"));

    set_env("VENDORBOARD_PORT", "9000");
    set_env("VENDORBOARD_STORE_PATH", "env.db");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path, PathBuf::from("env.db"));

    set_env("PORT", "7000");
    set_env("ALPHA_VANTAGE_API_KEY", "envkey");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 7000);
    assert_eq!(cfg.alpha_vantage_api_key.as_deref(), Some("envkey"));
    assert_eq!(cfg.store_path, PathBuf::from("env.db"));
    // Keys nobody overrides still come from the file.
    assert_eq!(cfg.memory_ttl_secs, 60);

    clear_env();
    std::fs::remove_file(&path).ok();
  }

  #[test]
  fn load_without_file_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let missing = std::env::temp_dir().join("vendorboard-no-such-config.toml");
    let cfg = ServerConfig::load(&missing).unwrap();
    assert_eq!(cfg.port, 3001);
    assert!(cfg.alpha_vantage_api_key.is_none());
  }
}
