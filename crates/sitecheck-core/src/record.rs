//! Site records — one row of the validation table.
//!
//! Every record carries all seven fields. "Nothing to report" is expressed
//! with the sentinel strings [`NO_SENSOR`] and [`NO_ISSUES`], never with an
//! empty value.

use std::{borrow::Cow, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

/// Sentinel stored in `issue_sensor` when no sensor is faulty.
pub const NO_SENSOR: &str = "None";

/// Sentinel stored in `issue_description` when there is nothing to report.
pub const NO_ISSUES: &str = "No Issues";

/// Date format used for `date_logged` everywhere it is rendered as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Validation status ───────────────────────────────────────────────────────

/// Outcome of the most recent site validation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
pub enum ValidationStatus {
  Validated,
  Failed,
  Pending,
}

impl ValidationStatus {
  /// Parse the exact label stored in the `Validation Report` column.
  pub fn from_label(label: &str) -> Result<Self> {
    label
      .parse()
      .map_err(|_| Error::UnknownStatus(label.to_owned()))
  }
}

// ─── WMS type ────────────────────────────────────────────────────────────────

/// The monitoring-station model installed at a site.
///
/// `WMS-1` and `WMS-2` are the known models; any other label round-trips
/// verbatim through [`WmsType::Other`].
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum WmsType {
  Wms1,
  Wms2,
  Other(String),
}

impl WmsType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Wms1 => "WMS-1",
      Self::Wms2 => "WMS-2",
      Self::Other(label) => label,
    }
  }

  /// The models every KPI view reports, even with a zero count.
  pub fn known() -> [WmsType; 2] { [Self::Wms1, Self::Wms2] }
}

impl From<&str> for WmsType {
  fn from(label: &str) -> Self {
    match label {
      "WMS-1" => Self::Wms1,
      "WMS-2" => Self::Wms2,
      other => Self::Other(other.to_owned()),
    }
  }
}

impl From<String> for WmsType {
  fn from(label: String) -> Self {
    match label.as_str() {
      "WMS-1" => Self::Wms1,
      "WMS-2" => Self::Wms2,
      _ => Self::Other(label),
    }
  }
}

impl From<WmsType> for String {
  fn from(wms: WmsType) -> Self {
    match wms {
      WmsType::Other(label) => label,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for WmsType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The seven columns of the table, in stored order. Displayed and parsed
/// using the persisted column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Field {
  #[strum(serialize = "Sr_No")]
  SerialNumber,
  #[strum(serialize = "Site Name")]
  SiteName,
  #[strum(serialize = "Validation Report")]
  ValidationStatus,
  #[strum(serialize = "Issue Sensors")]
  IssueSensor,
  #[strum(serialize = "WMS_Type")]
  WmsType,
  #[strum(serialize = "Issue_Description")]
  IssueDescription,
  #[strum(serialize = "Date_Logged")]
  DateLogged,
}

impl Field {
  pub const ALL: [Field; 7] = [
    Self::SerialNumber,
    Self::SiteName,
    Self::ValidationStatus,
    Self::IssueSensor,
    Self::WmsType,
    Self::IssueDescription,
    Self::DateLogged,
  ];

  /// Parse a persisted column name such as `"Validation Report"`.
  pub fn from_label(label: &str) -> Result<Self> {
    label
      .parse()
      .map_err(|_| Error::UnknownField(label.to_owned()))
  }

  /// The column header used in the table file.
  pub fn column(self) -> &'static str {
    match self {
      Self::SerialNumber => "Sr_No",
      Self::SiteName => "Site Name",
      Self::ValidationStatus => "Validation Report",
      Self::IssueSensor => "Issue Sensors",
      Self::WmsType => "WMS_Type",
      Self::IssueDescription => "Issue_Description",
      Self::DateLogged => "Date_Logged",
    }
  }
}

// ─── SiteRecord ──────────────────────────────────────────────────────────────

/// One row of the validation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
  /// Assigned by the store as `max + 1`; never reused or renumbered.
  pub serial_number:     u64,
  pub site_name:         String,
  pub validation_status: ValidationStatus,
  /// [`NO_SENSOR`] when no sensor is faulty.
  pub issue_sensor:      String,
  pub wms_type:          WmsType,
  /// [`NO_ISSUES`] when there is nothing to report.
  pub issue_description: String,
  /// Stamped on insert; never edited afterwards.
  pub date_logged:       NaiveDate,
}

impl SiteRecord {
  /// Whether this row belongs to the issue subset used by fault charts.
  pub fn has_sensor_issue(&self) -> bool { self.issue_sensor != NO_SENSOR }

  /// Textual value of `field`, exactly as it is persisted.
  pub fn field_text(&self, field: Field) -> Cow<'_, str> {
    match field {
      Field::SerialNumber => Cow::Owned(self.serial_number.to_string()),
      Field::SiteName => Cow::Borrowed(&self.site_name),
      Field::ValidationStatus => Cow::Borrowed(self.validation_status.as_ref()),
      Field::IssueSensor => Cow::Borrowed(&self.issue_sensor),
      Field::WmsType => Cow::Borrowed(self.wms_type.as_str()),
      Field::IssueDescription => Cow::Borrowed(&self.issue_description),
      Field::DateLogged => {
        Cow::Owned(self.date_logged.format(DATE_FORMAT).to_string())
      }
    }
  }
}

// ─── NewSiteRecord ───────────────────────────────────────────────────────────

/// Input to [`crate::store::RecordStore::insert`].
/// `serial_number` and `date_logged` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewSiteRecord {
  pub site_name:         String,
  pub validation_status: ValidationStatus,
  pub wms_type:          WmsType,
  /// Empty text is stored as [`NO_SENSOR`].
  pub issue_sensor:      String,
  /// Empty text is stored as [`NO_ISSUES`].
  pub issue_description: String,
}

impl NewSiteRecord {
  /// Convenience constructor for a site with no reported issue.
  pub fn new(
    site_name: impl Into<String>,
    validation_status: ValidationStatus,
    wms_type: WmsType,
  ) -> Self {
    Self {
      site_name: site_name.into(),
      validation_status,
      wms_type,
      issue_sensor: String::new(),
      issue_description: String::new(),
    }
  }

  /// Reject input that cannot become a fully-populated record.
  pub fn validate(&self) -> Result<()> {
    if self.site_name.trim().is_empty() {
      return Err(Error::Validation("Site Name is required.".into()));
    }
    if self.wms_type.as_str().trim().is_empty() {
      return Err(Error::Validation("WMS Type is required.".into()));
    }
    Ok(())
  }

  /// Build the stored record, substituting sentinels for empty text.
  pub(crate) fn into_record(
    self,
    serial_number: u64,
    date_logged: NaiveDate,
  ) -> SiteRecord {
    SiteRecord {
      serial_number,
      site_name: self.site_name,
      validation_status: self.validation_status,
      issue_sensor: or_sentinel(self.issue_sensor, NO_SENSOR),
      wms_type: self.wms_type,
      issue_description: or_sentinel(self.issue_description, NO_ISSUES),
      date_logged,
    }
  }
}

fn or_sentinel(text: String, sentinel: &str) -> String {
  if text.trim().is_empty() { sentinel.to_owned() } else { text }
}
