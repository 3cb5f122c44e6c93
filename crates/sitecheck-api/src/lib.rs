//! JSON REST API for sitecheck.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sitecheck_core::store::RecordStore`]. Each request is one full cycle:
//! reload the table, derive the view, respond. Transport concerns (binding,
//! request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sitecheck_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod records;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use sitecheck_core::store::RecordStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Records
    .route("/records", get(records::list::<S>).post(records::create::<S>))
    .route("/records/{site_name}", delete(records::delete_site::<S>))
    .route("/sites", get(records::sites::<S>))
    .route("/count", get(records::count::<S>))
    // Reports
    .route("/kpis", get(reports::kpis::<S>))
    .route("/charts/sensors", get(reports::sensors::<S>))
    .route("/charts/crosstab", get(reports::crosstab::<S>))
    .route("/charts/top-issues", get(reports::top_issues::<S>))
    .route("/dashboard", get(reports::dashboard::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
