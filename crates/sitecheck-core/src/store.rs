//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `sitecheck-store-csv`).
//! Higher layers (`sitecheck-api`, `sitecheck-cli`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{record::NewSiteRecord, table::Table};

/// Abstraction over the durable home of the validation table.
///
/// Every mutation takes the caller's current [`Table`] by value, applies the
/// change, rewrites the whole table to the backing medium and returns the
/// updated table. There is no partial update and no transaction spanning
/// more than one call.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the full table. If the backing medium holds no table yet, it is
  /// initialised with [`Table::seed`] and persisted first.
  fn load(&self) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  /// Append a record built from `input`, stamped with today's date and the
  /// next serial number, then persist.
  ///
  /// Returns a validation error without writing anything if `input` is
  /// rejected by [`NewSiteRecord::validate`].
  fn insert(
    &self,
    table: Table,
    input: NewSiteRecord,
  ) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  /// Remove every row named `site_name`, then persist. Deleting an absent
  /// name leaves the rows unchanged.
  fn delete<'a>(
    &'a self,
    table: Table,
    site_name: &'a str,
  ) -> impl Future<Output = Result<Table, Self::Error>> + Send + 'a;
}
