//! Free-text search over the table.
//!
//! A record matches when any of its seven fields, rendered as persisted text,
//! contains the search term under case-insensitive comparison. There is no
//! ranking: results keep table order.

use crate::{
  record::{Field, SiteRecord},
  table::Table,
};

/// A case-folded search term, prepared once and reused across rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
  needle: String,
}

impl SearchTerm {
  pub fn new(term: &str) -> Self { Self { needle: term.to_lowercase() } }

  /// An empty term matches every record.
  pub fn is_empty(&self) -> bool { self.needle.is_empty() }

  pub fn matches(&self, record: &SiteRecord) -> bool {
    self.is_empty()
      || Field::ALL
        .iter()
        .any(|&field| record.field_text(field).to_lowercase().contains(&self.needle))
  }
}

/// Records matching `term`, in table order. An empty term returns the whole
/// table.
pub fn search<'a>(table: &'a Table, term: &str) -> Vec<&'a SiteRecord> {
  let term = SearchTerm::new(term);
  table.iter().filter(|r| term.matches(r)).collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::record::{NewSiteRecord, ValidationStatus, WmsType};

  fn names<'a>(rows: &[&'a SiteRecord]) -> Vec<&'a str> {
    rows.iter().map(|r| r.site_name.as_str()).collect()
  }

  #[test]
  fn empty_term_returns_everything_in_order() {
    let table = Table::seed();
    let all = search(&table, "");
    assert_eq!(all.len(), 5);
    assert!(all.iter().zip(table.iter()).all(|(a, b)| *a == b));
  }

  #[test]
  fn matching_is_case_insensitive() {
    let table = Table::seed();
    assert_eq!(
      names(&search(&table, "NORTH")),
      vec!["Site-A (North)", "Site-E (North)"]
    );
    assert_eq!(names(&search(&table, "humidity")), vec!["Site-C (East)"]);
  }

  #[test]
  fn any_field_can_match() {
    let table = Table::seed();
    // status column
    assert_eq!(search(&table, "failed").len(), 2);
    // wms type column
    assert_eq!(search(&table, "wms-2").len(), 2);
    // date column
    assert_eq!(names(&search(&table, "2023-03")), vec!["Site-C (East)"]);
  }

  #[test]
  fn serial_numbers_match_as_text() {
    let mut table = Table::seed();
    for i in 0..7 {
      table = table
        .with_record(
          NewSiteRecord::new(format!("Extra-{i}"), ValidationStatus::Pending, WmsType::Wms1),
          NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(),
        )
        .unwrap();
    }
    let hits = search(&table, "12");
    let serials: Vec<_> = hits.iter().map(|r| r.serial_number).collect();
    // Site-E was logged 2023-05-12
    assert_eq!(serials, vec![5, 12]);
  }

  #[test]
  fn sentinels_are_searchable_text() {
    let table = Table::seed();
    assert_eq!(
      names(&search(&table, "no issues")),
      vec!["Site-B (South)", "Site-E (North)"]
    );
  }

  #[test]
  fn search_is_restartable() {
    let table = Table::seed();
    let first = search(&table, "sensor");
    let second = search(&table, "sensor");
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
  }

  #[test]
  fn no_match_yields_empty() {
    assert!(search(&Table::seed(), "zzz").is_empty());
  }
}
