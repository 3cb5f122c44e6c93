//! Handlers for the record table.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/records` | Optional `?search=<term>`; case-insensitive, any field |
//! | `POST`   | `/records` | Body: [`NewRecordBody`]; returns 201 + updated table |
//! | `DELETE` | `/records/{site_name}` | Removes every row with that name |
//! | `GET`    | `/sites` | Distinct site names, first-seen order |
//! | `GET`    | `/count` | `?field=<column>&value=<text>`; exact match count |
//!
//! Every handler starts by reloading the table: nothing is cached between
//! requests.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sitecheck_core::{
  Field, NewSiteRecord, SiteRecord, Table, ValidationStatus, WmsType,
  aggregate::count_by,
  query::search,
  store::RecordStore,
};

use crate::error::ApiError;

/// Returned by mutations: a user-facing message plus the table as it now
/// stands on disk.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
  pub message: String,
  pub records: Table,
}

// ─── List / search ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Free-text filter; empty or absent returns every row.
  pub search: Option<String>,
}

/// `GET /records[?search=<term>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SiteRecord>>, ApiError>
where
  S: RecordStore,
{
  let table = store.load().await.map_err(ApiError::store)?;
  let term = params.search.as_deref().unwrap_or_default();
  let rows = search(&table, term).into_iter().cloned().collect();
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /records`.
#[derive(Debug, Deserialize)]
pub struct NewRecordBody {
  pub site_name:         String,
  pub validation_status: ValidationStatus,
  pub wms_type:          WmsType,
  #[serde(default)]
  pub issue_sensor:      String,
  #[serde(default)]
  pub issue_description: String,
}

impl From<NewRecordBody> for NewSiteRecord {
  fn from(b: NewRecordBody) -> Self {
    NewSiteRecord {
      site_name:         b.site_name,
      validation_status: b.validation_status,
      wms_type:          b.wms_type,
      issue_sensor:      b.issue_sensor,
      issue_description: b.issue_description,
    }
  }
}

/// `POST /records` — returns 201 + the updated table.
///
/// A body that does not deserialise (e.g. an unknown status) is a 400 with
/// the usual JSON error shape.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewRecordBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let input = NewSiteRecord::from(body);
  input.validate()?;

  let site_name = input.site_name.clone();
  let table = store.load().await.map_err(ApiError::store)?;
  let records = store.insert(table, input).await.map_err(ApiError::store)?;

  Ok((
    StatusCode::CREATED,
    Json(MutationResponse {
      message: format!("Record for {site_name} saved successfully!"),
      records,
    }),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /records/{site_name}`
pub async fn delete_site<S>(
  State(store): State<Arc<S>>,
  Path(site_name): Path<String>,
) -> Result<Json<MutationResponse>, ApiError>
where
  S: RecordStore,
{
  let table = store.load().await.map_err(ApiError::store)?;
  let records = store
    .delete(table, &site_name)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(MutationResponse { message: format!("Deleted {site_name}"), records }))
}

// ─── Sites ────────────────────────────────────────────────────────────────────

/// `GET /sites`
pub async fn sites<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<String>>, ApiError>
where
  S: RecordStore,
{
  let table = store.load().await.map_err(ApiError::store)?;
  Ok(Json(table.site_names().into_iter().map(str::to_owned).collect()))
}

// ─── Count ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct CountParams {
  /// Column name as stored, e.g. `Validation Report`.
  pub field: String,
  pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
  #[serde(flatten)]
  pub params: CountParams,
  pub count:  usize,
}

/// `GET /count?field=<column>&value=<text>`
pub async fn count<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CountParams>,
) -> Result<Json<CountResponse>, ApiError>
where
  S: RecordStore,
{
  let field = Field::from_label(&params.field)?;
  let table = store.load().await.map_err(ApiError::store)?;
  let count = count_by(&table, field, &params.value);
  Ok(Json(CountResponse { params, count }))
}
