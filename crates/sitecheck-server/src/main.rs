//! sitecheck-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the CSV
//! record store, and serves the JSON API over HTTP.
//!
//! ```
//! SITECHECK_PORT=8080 cargo run -p sitecheck-server -- --config config.toml
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use sitecheck_core::store::RecordStore;
use sitecheck_server::ServerConfig;
use sitecheck_store_csv::CsvStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "WMS site validation API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the table file from the configuration.
  #[arg(long, value_name = "FILE")]
  data_file: Option<PathBuf>,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SITECHECK"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(path) = cli.data_file {
    server_cfg.data_file = path;
  }

  let data_file = expand_tilde(&server_cfg.data_file);

  // Open the store once up front so a missing file is seeded and a broken
  // one is reported before we start listening.
  let store = CsvStore::new(&data_file);
  let table = store
    .load()
    .await
    .with_context(|| format!("failed to open table at {data_file:?}"))?;
  tracing::info!(rows = table.len(), path = %data_file.display(), "table ready");

  let app = sitecheck_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
