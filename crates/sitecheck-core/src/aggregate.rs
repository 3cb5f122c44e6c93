//! KPI counts and chart series derived from a table snapshot.
//!
//! Everything here is a pure function of `&Table`. The fault-oriented series
//! (sensor distribution, type × status cross-tab, top issues) are computed
//! over the *issue subset*: rows whose `issue_sensor` is not the
//! [`NO_SENSOR`](crate::record::NO_SENSOR) sentinel. Note that this selects by
//! sensor presence, not by `Failed` status.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
  record::{Field, SiteRecord, ValidationStatus, WmsType},
  table::Table,
};

/// Shown instead of the sensor-distribution chart when the issue subset is
/// empty.
pub const NO_SENSOR_ISSUES_MESSAGE: &str = "No sensor issues found.";

/// Shown instead of the WMS cross-tab chart when the issue subset is empty.
pub const NO_CROSSTAB_MESSAGE: &str = "No data to compare.";

/// Shown instead of the top-issues chart when the issue subset is empty.
pub const NO_TOP_ISSUES_MESSAGE: &str =
  "System is running smoothly with no major issues.";

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn total_count(table: &Table) -> usize { table.len() }

/// Number of rows whose `field` text equals `value` exactly.
pub fn count_by(table: &Table, field: Field, value: &str) -> usize {
  table.iter().filter(|r| r.field_text(field) == value).count()
}

/// Rows with a faulty sensor recorded.
pub fn issue_subset(table: &Table) -> impl Iterator<Item = &SiteRecord> {
  table.iter().filter(|r| r.has_sensor_issue())
}

// ─── KPIs ────────────────────────────────────────────────────────────────────

/// The summary cards of the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
  /// Total sites monitored.
  pub total:   usize,
  /// Sites whose validation report is `Failed`.
  pub failed:  usize,
  /// Units per WMS type. `WMS-1` and `WMS-2` are always present.
  pub by_type: BTreeMap<String, usize>,
}

impl Kpis {
  pub fn units(&self, wms: &WmsType) -> usize {
    self.by_type.get(wms.as_str()).copied().unwrap_or(0)
  }
}

pub fn kpis(table: &Table) -> Kpis {
  let mut by_type: BTreeMap<String, usize> = WmsType::known()
    .iter()
    .map(|wms| (wms.as_str().to_owned(), 0))
    .collect();
  for record in table {
    *by_type.entry(record.wms_type.as_str().to_owned()).or_default() += 1;
  }

  Kpis {
    total: total_count(table),
    failed: count_by(table, Field::ValidationStatus, ValidationStatus::Failed.as_ref()),
    by_type,
  }
}

// ─── Chart series ────────────────────────────────────────────────────────────

/// Faulty-sensor name → number of rows naming it. An empty map means there
/// are no sensor issues at all.
pub fn issue_sensor_distribution(table: &Table) -> BTreeMap<String, usize> {
  let mut counts = BTreeMap::new();
  for record in issue_subset(table) {
    *counts.entry(record.issue_sensor.clone()).or_default() += 1;
  }
  counts
}

/// (WMS type, validation status) → row count over the issue subset. Only
/// observed pairs are present.
pub fn wms_failure_crosstab(
  table: &Table,
) -> BTreeMap<(WmsType, ValidationStatus), usize> {
  let mut counts = BTreeMap::new();
  for record in issue_subset(table) {
    *counts
      .entry((record.wms_type.clone(), record.validation_status))
      .or_default() += 1;
  }
  counts
}

/// One cell of [`wms_failure_crosstab`], flattened for JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosstabCell {
  pub wms_type:          WmsType,
  pub validation_status: ValidationStatus,
  pub count:             usize,
}

pub fn crosstab_cells(
  crosstab: &BTreeMap<(WmsType, ValidationStatus), usize>,
) -> Vec<CrosstabCell> {
  crosstab
    .iter()
    .map(|((wms_type, status), &count)| CrosstabCell {
      wms_type: wms_type.clone(),
      validation_status: *status,
      count,
    })
    .collect()
}

/// An issue description and how often it occurs in the issue subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCount {
  pub description: String,
  pub count:       usize,
}

/// Issue descriptions over the issue subset, most frequent first. Ties keep
/// the order in which descriptions were first encountered.
pub fn top_issue_descriptions(table: &Table) -> Vec<IssueCount> {
  let mut ranked: Vec<IssueCount> = Vec::new();
  let mut slot: HashMap<&str, usize> = HashMap::new();

  for record in issue_subset(table) {
    let description = record.issue_description.as_str();
    match slot.get(description) {
      Some(&i) => ranked[i].count += 1,
      None => {
        slot.insert(description, ranked.len());
        ranked.push(IssueCount { description: description.to_owned(), count: 1 });
      }
    }
  }

  // `sort_by` is stable, so first-seen order survives among equal counts.
  ranked.sort_by(|a, b| b.count.cmp(&a.count));
  ranked
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// A chart series plus the message to show when it has nothing to plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart<T> {
  pub data:     T,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fallback: Option<&'static str>,
}

/// Every view of the overview page, derived in one pass over one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
  pub kpis:                Kpis,
  pub sensor_distribution: Chart<BTreeMap<String, usize>>,
  pub wms_crosstab:        Chart<Vec<CrosstabCell>>,
  pub top_issues:          Chart<Vec<IssueCount>>,
}

impl Dashboard {
  pub fn compute(table: &Table) -> Self {
    let no_issues = issue_subset(table).next().is_none();
    let fallback = |message| no_issues.then_some(message);

    Self {
      kpis:                kpis(table),
      sensor_distribution: Chart {
        data:     issue_sensor_distribution(table),
        fallback: fallback(NO_SENSOR_ISSUES_MESSAGE),
      },
      wms_crosstab:        Chart {
        data:     crosstab_cells(&wms_failure_crosstab(table)),
        fallback: fallback(NO_CROSSTAB_MESSAGE),
      },
      top_issues:          Chart {
        data:     top_issue_descriptions(table),
        fallback: fallback(NO_TOP_ISSUES_MESSAGE),
      },
    }
  }
}
