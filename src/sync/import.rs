//! Bulk student import - roster CSV parsing and row validation
//!
//! Validation is client-side and row-scoped: a row missing any required
//! field is dropped from the batch with a reason, the rest still ship. The
//! required fields are first name, last name, guardian name, guardian phone,
//! and an address.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::student::{GeoPoint, GuardianContact, StudentDraft};

/// Errors raised while reading a roster file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read roster CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of an uploaded roster CSV
///
/// Header names match the roster template handed to schools. Coordinates are
/// optional; geocoding happens server-side when they are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentImportRow {
    pub first_name: String,
    pub last_name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub address: String,

    #[serde(default)]
    pub school: String,

    #[serde(default)]
    pub grade: String,

    #[serde(default)]
    pub guardian_email: Option<String>,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub lng: Option<f64>,
}

impl StudentImportRow {
    /// The reason this row cannot be submitted, if any
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            Some("missing first name")
        } else if self.last_name.trim().is_empty() {
            Some("missing last name")
        } else if self.guardian_name.trim().is_empty() {
            Some("missing guardian name")
        } else if self.guardian_phone.trim().is_empty() {
            Some("missing guardian phone")
        } else if self.address.trim().is_empty() {
            Some("missing address")
        } else {
            None
        }
    }

    /// Convert a validated row into a create draft
    pub fn into_draft(self) -> StudentDraft {
        let location = GeoPoint {
            address: self.address,
            lat: self.lat.unwrap_or(0.0),
            lng: self.lng.unwrap_or(0.0),
        };
        StudentDraft {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            school: self.school,
            grade: self.grade,
            guardian: GuardianContact {
                name: self.guardian_name,
                phone: self.guardian_phone,
                email: self.guardian_email,
            },
            pickup_location: location.clone(),
            dropoff_location: location,
        }
    }
}

/// A row excluded from the batch by validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based position of the row in the batch
    pub line: usize,

    /// Which required field was missing
    pub reason: String,
}

/// Parse a roster CSV into import rows
pub fn read_roster(reader: impl Read) -> Result<Vec<StudentImportRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Partition rows into submittable and rejected-with-reason
pub fn validate_rows(rows: Vec<StudentImportRow>) -> (Vec<StudentImportRow>, Vec<RejectedRow>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        match row.validation_error() {
            None => valid.push(row),
            Some(reason) => rejected.push(RejectedRow {
                line: index + 1,
                reason: reason.to_string(),
            }),
        }
    }
    (valid, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
first_name,last_name,guardian_name,guardian_phone,address,school,grade
Amir,Hassan,Layla Hassan,555-0134,12 Cedar Ave,Lincoln Elementary,5th Grade
Dana,Cole,,555-0177,1 Elm St,Lincoln Elementary,4th Grade
Joon,Park,Min Park,555-0190,77 Birch Rd,Lincoln Elementary,5th Grade
";

    #[test]
    fn test_read_roster() {
        let rows = read_roster(ROSTER.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].first_name, "Amir");
        assert_eq!(rows[1].guardian_name, "");
        assert!(rows[2].lat.is_none());
    }

    #[test]
    fn test_validate_rows_partitions() {
        let rows = read_roster(ROSTER.as_bytes()).unwrap();
        let (valid, rejected) = validate_rows(rows);
        assert_eq!(valid.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].line, 2);
        assert_eq!(rejected[0].reason, "missing guardian name");
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let row = StudentImportRow {
            first_name: "Amir".to_string(),
            last_name: "Hassan".to_string(),
            guardian_name: "Layla Hassan".to_string(),
            guardian_phone: "   ".to_string(),
            address: "12 Cedar Ave".to_string(),
            ..Default::default()
        };
        assert_eq!(row.validation_error(), Some("missing guardian phone"));
    }

    #[test]
    fn test_into_draft() {
        let rows = read_roster(ROSTER.as_bytes()).unwrap();
        let draft = rows.into_iter().next().unwrap().into_draft();
        assert_eq!(draft.name, "Amir Hassan");
        assert_eq!(draft.guardian.phone, "555-0134");
        assert_eq!(draft.pickup_location.address, "12 Cedar Ave");
        assert_eq!(draft.pickup_location, draft.dropoff_location);
    }
}
