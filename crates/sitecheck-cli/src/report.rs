//! Plain-text rendering of record tables and the overview dashboard.

use std::fmt;

use sitecheck_core::{Field, SiteRecord, aggregate::Dashboard};

// ─── Record table ─────────────────────────────────────────────────────────────

/// Rows rendered as left-aligned columns under the stored column names.
pub struct RecordTable<'a>(pub &'a [&'a SiteRecord]);

impl fmt::Display for RecordTable<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cells: Vec<Vec<String>> = self
      .0
      .iter()
      .map(|r| Field::ALL.iter().map(|&field| r.field_text(field).into_owned()).collect())
      .collect();

    let widths: Vec<usize> = Field::ALL
      .iter()
      .enumerate()
      .map(|(i, field)| {
        cells
          .iter()
          .map(|row| row[i].chars().count())
          .chain(std::iter::once(field.column().len()))
          .max()
          .unwrap_or(0)
      })
      .collect();

    let header: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    write_row(f, &header, &widths)?;
    for row in &cells {
      let row: Vec<&str> = row.iter().map(String::as_str).collect();
      write_row(f, &row, &widths)?;
    }
    write!(f, "({} rows)", cells.len())
  }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(cell, &width)| format!("{cell:<width$}"))
    .collect::<Vec<_>>()
    .join("  ");
  writeln!(f, "{}", line.trim_end())
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

/// The overview page: KPI cards followed by the three chart series, each
/// replaced by its fallback message when there is nothing to plot.
pub struct DashboardReport<'a>(pub &'a Dashboard);

impl fmt::Display for DashboardReport<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let dash = self.0;

    writeln!(f, "Total Sites Monitored: {}", dash.kpis.total)?;
    writeln!(f, "Sites with Issue:      {}", dash.kpis.failed)?;
    for (wms, units) in &dash.kpis.by_type {
      writeln!(f, "{wms} Units:           {units}")?;
    }

    writeln!(f)?;
    writeln!(f, "Issue Analysis by Sensor Type")?;
    match dash.sensor_distribution.fallback {
      Some(message) => writeln!(f, "  {message}")?,
      None => {
        for (sensor, count) in &dash.sensor_distribution.data {
          writeln!(f, "  {sensor:<24} {count}")?;
        }
      }
    }

    writeln!(f)?;
    writeln!(f, "WMS-1 vs WMS-2 Failure Analysis")?;
    match dash.wms_crosstab.fallback {
      Some(message) => writeln!(f, "  {message}")?,
      None => {
        for cell in &dash.wms_crosstab.data {
          writeln!(
            f,
            "  {:<8} {:<10} {}",
            cell.wms_type.as_str(),
            cell.validation_status.as_ref(),
            cell.count
          )?;
        }
      }
    }

    writeln!(f)?;
    writeln!(f, "Failure Correlation: Top Issues")?;
    match dash.top_issues.fallback {
      Some(message) => write!(f, "  {message}"),
      None => {
        for issue in &dash.top_issues.data {
          writeln!(f, "  {:<24} {}", issue.description, issue.count)?;
        }
        Ok(())
      }
    }
  }
}
