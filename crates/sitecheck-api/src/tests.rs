//! Router tests driving a CSV-backed store in a temporary directory.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode},
};
use serde_json::{Value, json};
use sitecheck_store_csv::CsvStore;
use tempfile::TempDir;
use tower::ServiceExt as _;

use crate::api_router;

fn app() -> (TempDir, Router) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = Arc::new(CsvStore::new(dir.path().join("site_records.csv")));
  (dir, api_router(store))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
  send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_record(app: &Router, body: Value) -> (StatusCode, Value) {
  let req = Request::post("/records")
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  send(app, req).await
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_seed_rows() {
  let (_dir, app) = app();
  let (status, body) = get(&app, "/records").await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 5);
  assert_eq!(rows[0]["site_name"], "Site-A (North)");
  assert_eq!(rows[0]["date_logged"], "2023-01-15");
  assert_eq!(rows[0]["wms_type"], "WMS-1");
}

#[tokio::test]
async fn search_filters_case_insensitively() {
  let (_dir, app) = app();
  let (status, body) = get(&app, "/records?search=PRESSURE").await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["serial_number"], 4);

  let (_, body) = get(&app, "/records?search=").await;
  assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn create_assigns_serial_and_sentinels() {
  let (_dir, app) = app();
  let (status, body) = post_record(
    &app,
    json!({
      "site_name": "Site-F",
      "validation_status": "Pending",
      "wms_type": "WMS-1",
      "issue_sensor": "",
    }),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["message"], "Record for Site-F saved successfully!");
  let added = &body["records"][5];
  assert_eq!(added["serial_number"], 6);
  assert_eq!(added["issue_sensor"], "None");
  assert_eq!(added["issue_description"], "No Issues");

  let (_, kpis) = get(&app, "/kpis").await;
  assert_eq!(kpis["total"], 6);
}

#[tokio::test]
async fn create_without_site_name_is_rejected() {
  let (_dir, app) = app();
  let (status, body) = post_record(
    &app,
    json!({
      "site_name": "",
      "validation_status": "Failed",
      "wms_type": "WMS-2",
    }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("Site Name is required."));

  let (_, rows) = get(&app, "/records").await;
  assert_eq!(rows.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn create_with_unknown_status_is_a_json_bad_request() {
  let (_dir, app) = app();
  let (status, body) = post_record(
    &app,
    json!({
      "site_name": "Site-F",
      "validation_status": "Done",
      "wms_type": "WMS-1",
    }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());

  let (_, rows) = get(&app, "/records").await;
  assert_eq!(rows.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn create_without_wms_type_is_rejected() {
  let (_dir, app) = app();
  let (status, body) = post_record(
    &app,
    json!({
      "site_name": "Site-F",
      "validation_status": "Pending",
      "wms_type": "  ",
    }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("WMS Type is required."));
}

#[tokio::test]
async fn delete_removes_site() {
  let (_dir, app) = app();
  let req = Request::delete("/records/Site-B%20(South)")
    .body(Body::empty())
    .unwrap();
  let (status, body) = send(&app, req).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Deleted Site-B (South)");
  assert_eq!(body["records"].as_array().unwrap().len(), 4);

  let (_, sites) = get(&app, "/sites").await;
  assert_eq!(
    sites,
    json!(["Site-A (North)", "Site-C (East)", "Site-D (West)", "Site-E (North)"])
  );
}

#[tokio::test]
async fn count_matches_exact_values() {
  let (_dir, app) = app();
  let (status, body) =
    get(&app, "/count?field=Validation%20Report&value=Failed").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["count"], 2);
  assert_eq!(body["field"], "Validation Report");

  let (status, _) = get(&app, "/count?field=Nope&value=x").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn charts_cover_the_issue_subset() {
  let (_dir, app) = app();

  let (_, sensors) = get(&app, "/charts/sensors").await;
  assert_eq!(
    sensors,
    json!({ "Humidity Sensor": 1, "Pressure Sensor": 1, "Temp Sensor": 1 })
  );

  let (_, crosstab) = get(&app, "/charts/crosstab").await;
  assert_eq!(
    crosstab,
    json!([
      { "wms_type": "WMS-1", "validation_status": "Validated", "count": 2 },
      { "wms_type": "WMS-2", "validation_status": "Failed", "count": 1 },
    ])
  );

  let (_, top) = get(&app, "/charts/top-issues").await;
  assert_eq!(top.as_array().unwrap().len(), 3);
  assert_eq!(top[0]["description"], "Calibration Drift");
}

#[tokio::test]
async fn dashboard_reports_fallbacks_once_issues_are_gone() {
  let (_dir, app) = app();
  for site in ["Site-A%20(North)", "Site-C%20(East)", "Site-D%20(West)"] {
    let req = Request::delete(format!("/records/{site}"))
      .body(Body::empty())
      .unwrap();
    send(&app, req).await;
  }

  let (status, dash) = get(&app, "/dashboard").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(dash["kpis"]["total"], 2);
  assert_eq!(dash["sensor_distribution"]["fallback"], "No sensor issues found.");
  assert_eq!(dash["wms_crosstab"]["fallback"], "No data to compare.");
  assert_eq!(
    dash["top_issues"]["fallback"],
    "System is running smoothly with no major issues."
  );
}

#[tokio::test]
async fn broken_store_is_service_unavailable() {
  let (dir, _) = app();
  std::fs::write(dir.path().join("site_records.csv"), "not,a,table\n").unwrap();
  let store = Arc::new(CsvStore::new(dir.path().join("site_records.csv")));
  let app = api_router(store);

  let (status, body) = get(&app, "/kpis").await;
  assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  assert!(body["error"].as_str().unwrap().starts_with("storage unavailable"));
}
