//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed structs. Any
//! stored value that does not decode is an integrity failure
//! ([`DatabaseError::Decode`]), never silently defaulted.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Render a timestamp in the stored form: RFC 3339, UTC, fixed microseconds.
///
/// Fixed width keeps text order equal to time order.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the string is not RFC 3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Decode(format!("bad timestamp '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Relies on each enum's serde renames matching its stored form.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Decode(format!("unrecognized value '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column holding a non-negative count.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the value is negative.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u64::try_from(raw).map_err(|_| DatabaseError::Decode(format!("negative count {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quire_core::enums::{EntityKind, EventKind};

    #[test]
    fn formatted_timestamps_are_fixed_width_and_sortable() {
        let early = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::TimeDelta::microseconds(1);
        let a = format_datetime(&early);
        let b = format_datetime(&late);
        assert_eq!(a, "2026-01-02T03:04:05.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_datetime(&b).unwrap(), late);
    }

    #[test]
    fn bad_timestamp_is_decode_error() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Decode(_))
        ));
    }

    #[test]
    fn enums_parse_from_stored_form() {
        assert_eq!(parse_enum::<EntityKind>("Acl").unwrap(), EntityKind::AccessEntry);
        assert_eq!(parse_enum::<EventKind>("DELETE").unwrap(), EventKind::Delete);
        assert!(matches!(
            parse_enum::<EventKind>("ARCHIVE"),
            Err(DatabaseError::Decode(_))
        ));
    }
}
