//! Column layout of the table file.
//!
//! The header row is mandatory and must match [`HEADER`] exactly, in order.
//! Future layout changes would need a new header, not a reordering.

use sitecheck_core::Field;

/// Header row, in stored column order.
pub const HEADER: [&str; 7] = [
  "Sr_No",
  "Site Name",
  "Validation Report",
  "Issue Sensors",
  "WMS_Type",
  "Issue_Description",
  "Date_Logged",
];

/// Fields in the same order as [`HEADER`].
pub const FIELDS: [Field; 7] = Field::ALL;
