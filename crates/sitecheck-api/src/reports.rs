//! Handlers feeding the overview page: KPI cards and chart series.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/kpis` | Totals, failures, units per WMS type |
//! | `GET`  | `/charts/sensors` | Faulty-sensor distribution (issue subset) |
//! | `GET`  | `/charts/crosstab` | WMS type × validation status (issue subset) |
//! | `GET`  | `/charts/top-issues` | Issue descriptions, most frequent first |
//! | `GET`  | `/dashboard` | All of the above from a single load |

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};
use sitecheck_core::{
  Table,
  aggregate::{
    self, CrosstabCell, Dashboard, IssueCount, Kpis, crosstab_cells,
  },
  store::RecordStore,
};

use crate::error::ApiError;

async fn snapshot<S: RecordStore>(store: &S) -> Result<Table, ApiError> {
  store.load().await.map_err(ApiError::store)
}

/// `GET /kpis`
pub async fn kpis<S>(State(store): State<Arc<S>>) -> Result<Json<Kpis>, ApiError>
where
  S: RecordStore,
{
  let table = snapshot(store.as_ref()).await?;
  Ok(Json(aggregate::kpis(&table)))
}

/// `GET /charts/sensors` — an empty object means there are no sensor issues.
pub async fn sensors<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<BTreeMap<String, usize>>, ApiError>
where
  S: RecordStore,
{
  let table = snapshot(store.as_ref()).await?;
  Ok(Json(aggregate::issue_sensor_distribution(&table)))
}

/// `GET /charts/crosstab`
pub async fn crosstab<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CrosstabCell>>, ApiError>
where
  S: RecordStore,
{
  let table = snapshot(store.as_ref()).await?;
  Ok(Json(crosstab_cells(&aggregate::wms_failure_crosstab(&table))))
}

/// `GET /charts/top-issues`
pub async fn top_issues<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<IssueCount>>, ApiError>
where
  S: RecordStore,
{
  let table = snapshot(store.as_ref()).await?;
  Ok(Json(aggregate::top_issue_descriptions(&table)))
}

/// `GET /dashboard`
pub async fn dashboard<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: RecordStore,
{
  let table = snapshot(store.as_ref()).await?;
  Ok(Json(Dashboard::compute(&table)))
}
