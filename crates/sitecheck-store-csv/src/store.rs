//! [`CsvStore`] — the CSV file implementation of [`RecordStore`].

use std::{
  collections::HashSet,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Local;
use sitecheck_core::{NewSiteRecord, Table, store::RecordStore};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  columns::HEADER,
  encode::{RawRecord, check_header, encode_record},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single CSV file.
///
/// Cloning is cheap — the path is reference-counted. No lock is taken: two
/// writers racing on the same file both succeed and the last one wins.
#[derive(Clone, Debug)]
pub struct CsvStore {
  path: Arc<PathBuf>,
}

impl CsvStore {
  /// A store over the file at `path`. Nothing is touched until the first
  /// [`RecordStore::load`].
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: Arc::new(path.into()) }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Run blocking file I/O against the store path off the async runtime.
  async fn blocking<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Path) -> Result<T> + Send + 'static,
  {
    let path = Arc::clone(&self.path);
    tokio::task::spawn_blocking(move || f(path.as_path())).await?
  }

  /// Rewrite the whole file with `table` and hand the table back.
  async fn persist(&self, table: Table) -> Result<Table> {
    self
      .blocking(move |path| {
        write_table(path, &table)?;
        Ok(table)
      })
      .await
  }
}

// ─── File I/O ────────────────────────────────────────────────────────────────

fn load_or_seed(path: &Path) -> Result<Table> {
  if !path.try_exists()? {
    let table = Table::seed();
    write_table(path, &table)?;
    info!(path = %path.display(), rows = table.len(), "seeded new table file");
    return Ok(table);
  }
  read_table(path)
}

fn read_table(path: &Path) -> Result<Table> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_path(path)?;

  check_header(reader.headers()?)?;

  let mut records = Vec::new();
  let mut serials = HashSet::new();
  for row in reader.records() {
    let row = row?;
    let record = RawRecord::from_row(&row)?.into_record()?;
    if !serials.insert(record.serial_number) {
      let line = row.position().map_or(0, |p| p.line());
      return Err(Error::malformed(
        line,
        format!("duplicate serial number {}", record.serial_number),
      ));
    }
    records.push(record);
  }

  debug!(path = %path.display(), rows = records.len(), "loaded table");
  Ok(Table::new(records))
}

fn write_table(path: &Path, table: &Table) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)?;
  writer.write_record(HEADER)?;
  for record in table {
    writer.write_record(encode_record(record))?;
  }
  writer.flush()?;
  debug!(path = %path.display(), rows = table.len(), "persisted table");
  Ok(())
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for CsvStore {
  type Error = Error;

  async fn load(&self) -> Result<Table> { self.blocking(load_or_seed).await }

  async fn insert(&self, table: Table, input: NewSiteRecord) -> Result<Table> {
    let site_name = input.site_name.clone();
    let today = Local::now().date_naive();

    let table = match table.with_record(input, today) {
      Ok(table) => table,
      Err(e) => {
        warn!(site = %site_name, error = %e, "rejected new record");
        return Err(e.into());
      }
    };

    let serial = table.records().last().map_or(0, |r| r.serial_number);
    let table = self.persist(table).await?;
    info!(site = %site_name, serial, "added record");
    Ok(table)
  }

  async fn delete(&self, table: Table, site_name: &str) -> Result<Table> {
    let (table, removed) = table.without_site(site_name);
    let table = self.persist(table).await?;
    info!(site = %site_name, removed, "deleted records");
    Ok(table)
  }
}
