//! Core types and pure logic for the sitecheck validation table.
//!
//! This crate is deliberately free of HTTP and file-format dependencies. The
//! table is an explicit [`Table`] value: storage backends load it, callers
//! derive views from it with [`query`] and [`aggregate`], and mutations hand
//! it back to a [`store::RecordStore`] to be persisted.

pub mod aggregate;
pub mod error;
pub mod query;
pub mod record;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use record::{Field, NewSiteRecord, SiteRecord, ValidationStatus, WmsType};
pub use table::Table;
