//! Encoding and decoding helpers between [`SiteRecord`] and the plain-text
//! cells of a CSV row.
//!
//! Serial numbers are written as integers; integral floats such as `6.0` are
//! accepted on read. Dates are `YYYY-MM-DD`. Statuses and WMS types use their
//! display labels.

use chrono::NaiveDate;
use csv::StringRecord;
use sitecheck_core::{
  SiteRecord, ValidationStatus, WmsType,
  record::DATE_FORMAT,
};

use crate::{
  Error, Result,
  columns::{FIELDS, HEADER},
};

// ─── Header ──────────────────────────────────────────────────────────────────

pub fn check_header(header: &StringRecord) -> Result<()> {
  if header.iter().eq(HEADER) {
    Ok(())
  } else {
    let found: Vec<_> = header.iter().collect();
    Err(Error::malformed(
      1,
      format!("expected header {HEADER:?}, found {found:?}"),
    ))
  }
}

// ─── Cells ───────────────────────────────────────────────────────────────────

/// The seven cells of `record`, in [`HEADER`] order.
pub fn encode_record(record: &SiteRecord) -> [String; 7] {
  FIELDS.map(|field| record.field_text(field).into_owned())
}

pub fn decode_serial(s: &str) -> std::result::Result<u64, String> {
  if let Ok(n) = s.parse::<u64>() {
    return positive(n);
  }
  match s.parse::<f64>() {
    Ok(f) if f.fract() == 0.0 && f >= 1.0 && f <= u64::MAX as f64 => positive(f as u64),
    _ => Err(format!("invalid serial number {s:?}")),
  }
}

fn positive(n: u64) -> std::result::Result<u64, String> {
  if n == 0 { Err("serial number must be positive".into()) } else { Ok(n) }
}

/// Only the zero-padded `YYYY-MM-DD` form is accepted, so a row is written
/// back exactly as it was read.
pub fn decode_date(s: &str) -> std::result::Result<NaiveDate, String> {
  let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| format!("invalid date {s:?}: {e}"))?;
  if date.format(DATE_FORMAT).to_string() != s {
    return Err(format!("date {s:?} is not in YYYY-MM-DD form"));
  }
  Ok(date)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from one data row.
pub struct RawRecord {
  pub line:              u64,
  pub serial_number:     String,
  pub site_name:         String,
  pub validation_status: String,
  pub issue_sensor:      String,
  pub wms_type:          String,
  pub issue_description: String,
  pub date_logged:       String,
}

impl RawRecord {
  pub fn from_row(row: &StringRecord) -> Result<Self> {
    let line = row.position().map_or(0, |p| p.line());
    if row.len() != HEADER.len() {
      return Err(Error::malformed(
        line,
        format!("expected {} columns, found {}", HEADER.len(), row.len()),
      ));
    }
    let cell = |i: usize| row.get(i).unwrap_or_default().to_owned();

    Ok(Self {
      line,
      serial_number: cell(0),
      site_name: cell(1),
      validation_status: cell(2),
      issue_sensor: cell(3),
      wms_type: cell(4),
      issue_description: cell(5),
      date_logged: cell(6),
    })
  }

  pub fn into_record(self) -> Result<SiteRecord> {
    let line = self.line;
    let malformed = |reason: String| Error::malformed(line, reason);

    for (column, value) in [
      (HEADER[1], &self.site_name),
      (HEADER[3], &self.issue_sensor),
      (HEADER[4], &self.wms_type),
      (HEADER[5], &self.issue_description),
    ] {
      if value.is_empty() {
        return Err(malformed(format!("empty {column:?}")));
      }
    }

    let serial_number = decode_serial(&self.serial_number).map_err(malformed)?;
    let validation_status = ValidationStatus::from_label(&self.validation_status)
      .map_err(|e| malformed(e.to_string()))?;
    let date_logged = decode_date(&self.date_logged).map_err(malformed)?;

    Ok(SiteRecord {
      serial_number,
      site_name: self.site_name,
      validation_status,
      issue_sensor: self.issue_sensor,
      wms_type: WmsType::from(self.wms_type),
      issue_description: self.issue_description,
      date_logged,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serial_accepts_integral_floats() {
    assert_eq!(decode_serial("6"), Ok(6));
    assert_eq!(decode_serial("6.0"), Ok(6));
    assert!(decode_serial("6.5").is_err());
    assert!(decode_serial("0").is_err());
    assert!(decode_serial("-1").is_err());
    assert!(decode_serial("six").is_err());
  }

  #[test]
  fn date_must_be_iso() {
    assert_eq!(
      decode_date("2023-01-15"),
      Ok(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
    );
    assert!(decode_date("15/01/2023").is_err());
    assert!(decode_date("2023-02-30").is_err());
    assert!(decode_date("2023-1-5").is_err());
  }

  #[test]
  fn row_with_wrong_width_is_rejected() {
    let row = StringRecord::from(vec!["1", "Site-A", "Validated"]);
    let err = RawRecord::from_row(&row).err().unwrap();
    assert!(matches!(err, Error::Malformed { .. }));
  }

  #[test]
  fn unknown_status_is_rejected() {
    let row = StringRecord::from(vec![
      "1", "Site-A", "Done", "None", "WMS-1", "No Issues", "2023-01-15",
    ]);
    let err = RawRecord::from_row(&row).unwrap().into_record().unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }));
  }

  #[test]
  fn encode_then_decode_preserves_every_cell() {
    let record = sitecheck_core::Table::seed().records()[0].clone();
    let cells = encode_record(&record);
    assert_eq!(
      cells,
      [
        "1",
        "Site-A (North)",
        "Validated",
        "Temp Sensor",
        "WMS-1",
        "Calibration Drift",
        "2023-01-15",
      ]
    );
    let decoded = RawRecord::from_row(&StringRecord::from(cells.to_vec()))
      .unwrap()
      .into_record()
      .unwrap();
    assert_eq!(decoded, record);
  }
}
