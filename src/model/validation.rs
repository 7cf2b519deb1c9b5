use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Validation errors for report fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("officer profile is incomplete")]
    IncompleteProfile,
}

static PICKER_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid hardcoded regex"));

static DISPLAY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid hardcoded regex"));

/// Fails with [`ValidationError::MissingField`] when `value` is blank.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Converts a date-picker value (`YYYY-MM-DD`) into the report's `DD/MM/YYYY`.
///
/// A value already in `DD/MM/YYYY` is accepted unchanged. Either form must
/// name a real calendar day.
pub fn normalize_birthdate(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    let parts: (Result<i32, _>, Result<u32, _>, Result<u32, _>) =
        if let Some(caps) = PICKER_DATE_RE.captures(raw) {
            (caps[1].parse(), caps[2].parse(), caps[3].parse())
        } else if let Some(caps) = DISPLAY_DATE_RE.captures(raw) {
            (caps[3].parse(), caps[2].parse(), caps[1].parse())
        } else {
            return Err(ValidationError::InvalidDate(raw.to_string()));
        };

    let date = match parts {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))?;

    Ok(date.format("%d/%m/%Y").to_string())
}

/// Parses a whole-number measurement (height in cm, weight in kg).
pub fn parse_measure(field: &'static str, raw: &str) -> Result<u16, ValidationError> {
    let raw = raw.trim();
    validate_required(field, raw)?;
    raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- validate_required ---

    #[test]
    fn required_accepts_text() {
        assert_eq!(validate_required("reason", "Vol"), Ok(()));
    }

    #[test]
    fn required_rejects_empty() {
        assert_eq!(
            validate_required("reason", ""),
            Err(ValidationError::MissingField("reason"))
        );
    }

    #[test]
    fn required_rejects_whitespace() {
        assert_eq!(
            validate_required("reason", "  \n"),
            Err(ValidationError::MissingField("reason"))
        );
    }

    // --- normalize_birthdate ---

    #[test]
    fn picker_value_is_reformatted() {
        assert_eq!(normalize_birthdate("1990-02-01"), Ok("01/02/1990".to_string()));
    }

    #[test]
    fn display_value_is_kept() {
        assert_eq!(normalize_birthdate("01/02/1990"), Ok("01/02/1990".to_string()));
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(normalize_birthdate(" 1990-02-01 "), Ok("01/02/1990".to_string()));
    }

    #[test]
    fn impossible_day_rejected() {
        assert_eq!(
            normalize_birthdate("1990-02-30"),
            Err(ValidationError::InvalidDate("1990-02-30".to_string()))
        );
    }

    #[test]
    fn free_text_rejected() {
        assert_eq!(
            normalize_birthdate("hier"),
            Err(ValidationError::InvalidDate("hier".to_string()))
        );
    }

    #[test]
    fn empty_date_rejected() {
        assert_eq!(
            normalize_birthdate(""),
            Err(ValidationError::InvalidDate(String::new()))
        );
    }

    #[quickcheck]
    fn valid_picker_dates_round_trip(days: u16) -> bool {
        let base = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let date = base + chrono::Days::new(u64::from(days));
        let picker = date.format("%Y-%m-%d").to_string();
        normalize_birthdate(&picker) == Ok(date.format("%d/%m/%Y").to_string())
    }

    // --- parse_measure ---

    #[test]
    fn measure_parses_integer() {
        assert_eq!(parse_measure("height", "182"), Ok(182));
    }

    #[test]
    fn measure_empty_is_missing() {
        assert_eq!(
            parse_measure("height", ""),
            Err(ValidationError::MissingField("height"))
        );
    }

    #[test]
    fn measure_rejects_decimal() {
        assert_eq!(
            parse_measure("weight", "72.5"),
            Err(ValidationError::InvalidNumber {
                field: "weight",
                value: "72.5".to_string()
            })
        );
    }
}
