//! Field validators and date handling shared by the entities.

use super::errors::ValidationError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Date-time layouts accepted for due dates, tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Current local wall-clock time. All stored timestamps are naive local time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Trims and rejects empty or whitespace-only titles.
pub fn validate_title(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims and requires at least two characters.
pub fn validate_name(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    Ok(trimmed.to_string())
}

/// Basic shape check: an "@" and a "." somewhere in the address.
pub fn validate_email(value: &str) -> Result<String, ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(value.trim().to_string())
}

/// Free text; only trimmed.
pub fn normalize_description(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a due date. A bare date means midnight; an RFC 3339 value with an
/// offset is converted to local time.
pub fn parse_due_date(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let s = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))
}

/// Serde hook: stored due dates go through the same lenient parser as user input.
pub(crate) fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_title_trimmed_and_non_empty() {
        assert_eq!(validate_title("  Launch  ").unwrap(), "Launch");
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("   \t"), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_name_min_length() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name(" A "), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name("Al").unwrap(), "Al");
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(validate_email("bad"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@bc"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(" a@b.c ").unwrap(), "a@b.c");
    }

    #[test]
    fn test_due_date_bare_date_is_midnight() {
        let dt = parse_due_date("2099-01-01").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_due_date_accepts_iso_date_times() {
        let a = parse_due_date("2024-05-01T09:30:00").unwrap();
        let b = parse_due_date("2024-05-01 09:30").unwrap();
        let c = parse_due_date("2024-05-01T09:30:00.250000").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hour(), 9);
        assert_eq!(c.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_due_date_rejects_garbage() {
        assert_eq!(
            parse_due_date("next tuesday"),
            Err(ValidationError::InvalidDate("next tuesday".to_string()))
        );
        assert!(parse_due_date("2024-13-01").is_err());
        assert!(parse_due_date("").is_err());
    }
}
