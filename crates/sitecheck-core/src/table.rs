//! [`Table`] — the in-memory snapshot of every site record.
//!
//! A table is loaded fresh at the start of each interaction cycle and passed
//! by value through mutations, so no derived state outlives the cycle that
//! produced it. Mutating methods here are pure; persisting the result is the
//! job of a [`crate::store::RecordStore`].

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  record::{NewSiteRecord, SiteRecord, ValidationStatus, WmsType},
};

/// Ordered rows of the validation table. Row order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
  records: Vec<SiteRecord>,
}

impl Table {
  pub fn new(records: Vec<SiteRecord>) -> Self { Self { records } }

  /// The five rows a fresh store is initialised with.
  pub fn seed() -> Self {
    let rows: [(&str, ValidationStatus, &str, WmsType, &str, (i32, u32, u32)); 5] = [
      (
        "Site-A (North)",
        ValidationStatus::Validated,
        "Temp Sensor",
        WmsType::Wms1,
        "Calibration Drift",
        (2023, 1, 15),
      ),
      (
        "Site-B (South)",
        ValidationStatus::Failed,
        "None",
        WmsType::Wms2,
        "No Issues",
        (2023, 2, 20),
      ),
      (
        "Site-C (East)",
        ValidationStatus::Validated,
        "Humidity Sensor",
        WmsType::Wms1,
        "Connector Fault",
        (2023, 3, 10),
      ),
      (
        "Site-D (West)",
        ValidationStatus::Failed,
        "Pressure Sensor",
        WmsType::Wms2,
        "Power Failure",
        (2023, 4, 5),
      ),
      (
        "Site-E (North)",
        ValidationStatus::Pending,
        "None",
        WmsType::Wms1,
        "No Issues",
        (2023, 5, 12),
      ),
    ];

    let records = rows
      .into_iter()
      .zip(1..)
      .map(|((site, status, sensor, wms, description, (y, m, d)), serial)| {
        SiteRecord {
          serial_number:     serial,
          site_name:         site.to_owned(),
          validation_status: status,
          issue_sensor:      sensor.to_owned(),
          wms_type:          wms,
          issue_description: description.to_owned(),
          date_logged:       NaiveDate::from_ymd_opt(y, m, d)
            .expect("seed dates are valid calendar dates"),
        }
      })
      .collect();

    Self { records }
  }

  pub fn records(&self) -> &[SiteRecord] { &self.records }

  pub fn into_records(self) -> Vec<SiteRecord> { self.records }

  pub fn iter(&self) -> std::slice::Iter<'_, SiteRecord> { self.records.iter() }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// `max(existing serials) + 1`, or `1` for an empty table. `None` once the
  /// largest serial is `u64::MAX`.
  pub fn next_serial(&self) -> Option<u64> {
    match self.records.iter().map(|r| r.serial_number).max() {
      Some(max) => max.checked_add(1),
      None => Some(1),
    }
  }

  /// Append a new record built from `input`, logged on `today`.
  ///
  /// On a validation error the table is dropped unchanged; callers that need
  /// it afterwards should keep their own copy or reload.
  pub fn with_record(mut self, input: NewSiteRecord, today: NaiveDate) -> Result<Self> {
    input.validate()?;
    let serial = self.next_serial().ok_or_else(|| {
      Error::Validation("No serial numbers left; the table is full.".into())
    })?;
    self.records.push(input.into_record(serial, today));
    Ok(self)
  }

  /// Remove every row whose `site_name` equals `site_name` exactly.
  ///
  /// Duplicated names are all removed. Returns the table and the number of
  /// rows dropped.
  pub fn without_site(mut self, site_name: &str) -> (Self, usize) {
    let before = self.records.len();
    self.records.retain(|r| r.site_name != site_name);
    let removed = before - self.records.len();
    (self, removed)
  }

  /// Distinct site names in first-seen order, as offered by a delete picker.
  pub fn site_names(&self) -> Vec<&str> {
    let mut seen = HashSet::new();
    self
      .records
      .iter()
      .map(|r| r.site_name.as_str())
      .filter(|name| seen.insert(*name))
      .collect()
  }
}

impl<'a> IntoIterator for &'a Table {
  type IntoIter = std::slice::Iter<'a, SiteRecord>;
  type Item = &'a SiteRecord;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
