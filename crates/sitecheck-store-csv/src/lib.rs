//! CSV file backend for the sitecheck record store.
//!
//! The whole table lives in one comma-separated file with a fixed header row.
//! Every load reads the full file and every mutation rewrites it; blocking
//! file I/O runs on tokio's blocking pool so callers never stall the async
//! runtime.

mod columns;
mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::CsvStore;
