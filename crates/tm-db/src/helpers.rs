//! Row-to-entity parsing helpers.
//!
//! Dates are stored as `%Y-%m-%d` TEXT, timestamps as RFC 3339 TEXT (or
//! SQLite's `datetime('now')` format for column defaults).

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DatabaseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read an INTEGER column that must fit in a `u8`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value is out of range.
pub fn get_u8(row: &libsql::Row, idx: i32) -> Result<u8, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u8::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("column {idx} holds {raw}, expected 0..=255")))
}

/// Subtract hours from a workload, flooring at zero to absorb float residue.
#[must_use]
pub fn decrement_workload(workload: f64, hours: f64) -> f64 {
    (workload - hours).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn date_text_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert_eq!(format_date(date), "2026-07-04");
        assert_eq!(parse_date("2026-07-04").unwrap(), date);
    }

    #[test]
    fn decrement_floors_at_zero() {
        assert!((decrement_workload(3.0, 1.0) - 2.0).abs() < f64::EPSILON);
        assert!(decrement_workload(0.1 + 0.2, 0.3 + 1e-12).abs() < f64::EPSILON);
    }
}
