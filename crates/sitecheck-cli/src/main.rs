//! `sitecheck` — operator CLI for the WMS site validation table.
//!
//! Works directly on the table file; every invocation is one full cycle of
//! load, derive, print (and persist, for `add`/`delete`).
//!
//! # Usage
//!
//! ```
//! sitecheck report
//! sitecheck list --search north
//! sitecheck add --site "Site-F" --status Pending --wms WMS-1
//! sitecheck delete "Site-F"
//! sitecheck --data /srv/wms/site_records.csv sites
//! ```

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use report::{DashboardReport, RecordTable};
use serde::Deserialize;
use sitecheck_core::{
  Field, NewSiteRecord, ValidationStatus, WmsType,
  aggregate::{Dashboard, count_by},
  query::search,
  store::RecordStore,
};
use sitecheck_store_csv::CsvStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sitecheck", about = "WMS site validation records")]
struct Args {
  /// Path to a TOML config file (data_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// The CSV table file (default: site_records.csv).
  #[arg(long, env = "SITECHECK_DATA", value_name = "FILE")]
  data: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the records, optionally filtered by a case-insensitive search.
  List {
    #[arg(short, long)]
    search: Option<String>,
  },
  /// Add a new site record; serial number and date are assigned.
  Add {
    #[arg(long)]
    site:        String,
    /// Validated, Failed or Pending.
    #[arg(long, default_value = "Pending", value_parser = parse_status)]
    status:      ValidationStatus,
    #[arg(long, default_value = "WMS-1")]
    wms:         String,
    /// Faulty sensor; stored as "None" when omitted.
    #[arg(long, default_value = "")]
    sensor:      String,
    /// Issue description; stored as "No Issues" when omitted.
    #[arg(long, default_value = "")]
    description: String,
  },
  /// Delete every record with this exact site name.
  Delete { site: String },
  /// List distinct site names.
  Sites,
  /// Count rows whose column exactly equals a value.
  Count {
    /// Column name, e.g. "Validation Report".
    field: String,
    value: String,
  },
  /// Print KPIs and chart series.
  Report,
}

fn parse_status(s: &str) -> std::result::Result<ValidationStatus, String> {
  ValidationStatus::from_label(s).map_err(|e| e.to_string())
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  data_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

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
  let data_file = args
    .data
    .or(file_cfg.data_file)
    .unwrap_or_else(|| PathBuf::from("site_records.csv"));

  let store = CsvStore::new(data_file);
  run(&store, args.command).await
}

async fn run(store: &CsvStore, command: Command) -> Result<()> {
  let table = store
    .load()
    .await
    .with_context(|| format!("loading {}", store.path().display()))?;

  match command {
    Command::List { search: term } => {
      let rows = search(&table, term.as_deref().unwrap_or_default());
      println!("{}", RecordTable(&rows));
    }
    Command::Add { site, status, wms, sensor, description } => {
      let input = NewSiteRecord {
        site_name:         site.clone(),
        validation_status: status,
        wms_type:          WmsType::from(wms),
        issue_sensor:      sensor,
        issue_description: description,
      };
      match store.insert(table, input).await {
        Ok(_) => println!("Record for {site} saved successfully!"),
        Err(e) if e.is_validation() => bail!("{e}"),
        Err(e) => return Err(e).context("saving record"),
      }
    }
    Command::Delete { site } => {
      store.delete(table, &site).await.context("deleting record")?;
      println!("Deleted {site}");
    }
    Command::Sites => {
      for name in table.site_names() {
        println!("{name}");
      }
    }
    Command::Count { field, value } => {
      let field = Field::from_label(&field)?;
      println!("{}", count_by(&table, field, &value));
    }
    Command::Report => {
      println!("{}", DashboardReport(&Dashboard::compute(&table)));
    }
  }

  Ok(())
}
