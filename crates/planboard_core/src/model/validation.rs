//! Field validation rules shared by entity setters.
//!
//! # Responsibility
//! - Enforce length bounds, status vocabulary and due-date format.
//! - Keep rule checks pure so setters can validate before assigning.
//!
//! # Invariants
//! - Lengths are counted in Unicode scalar values, not bytes.
//! - Due dates need a four-digit year, 1-2 digit month and day, and must name
//!   a real calendar day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for task and project names.
pub const MAX_NAME_CHARS: usize = 30;
/// Upper bound for task and project descriptions.
pub const MAX_DESCRIPTION_CHARS: usize = 150;
/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

static DUE_DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid due date regex"));

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text field exceeds its character bound.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Status value is not one of `todo|doing|done`.
    InvalidStatus(String),
    /// Due date is not a `YYYY-MM-DD` calendar date.
    InvalidDueDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong { field, max, actual } => write!(
                f,
                "{field} must be {max} characters or fewer (got {actual})"
            ),
            Self::InvalidStatus(value) => write!(
                f,
                "status must be \"todo\", \"doing\", or \"done\" (got `{value}`)"
            ),
            Self::InvalidDueDate(value) => {
                write!(f, "due date must be in 'YYYY-MM-DD' format (got `{value}`)")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks one text field against its character bound.
pub fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Validates a name field (task or project).
pub fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_length(field, value, MAX_NAME_CHARS)
}

/// Validates a description field (task or project).
pub fn check_description(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_length(field, value, MAX_DESCRIPTION_CHARS)
}

/// Parses a `YYYY-MM-DD` due date.
///
/// Month and day may be unpadded (`2024-1-5`); the year must be exactly four
/// digits, which chrono alone would not enforce.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if !DUE_DATE_SHAPE_RE.is_match(value) {
        return Err(ValidationError::InvalidDueDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(value.to_string()))
}

/// Renders a due date back into its wire format.
pub fn format_due_date(value: NaiveDate) -> String {
    value.format(DUE_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{check_description, check_name, format_due_date, parse_due_date, ValidationError};

    #[test]
    fn name_bound_is_inclusive() {
        check_name("name", &"a".repeat(30)).expect("30 chars should pass");
        let err = check_name("name", &"a".repeat(31)).expect_err("31 chars must fail");
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "name",
                max: 30,
                actual: 31
            }
        );
    }

    #[test]
    fn lengths_count_chars_not_bytes() {
        check_name("name", &"é".repeat(30)).expect("multibyte chars count once");
        check_description("description", &"ü".repeat(150)).expect("150 chars should pass");
    }

    #[test]
    fn due_date_accepts_padded_calendar_dates() {
        let date = parse_due_date("2024-02-29").expect("leap day is valid");
        assert_eq!(format_due_date(date), "2024-02-29");
    }

    #[test]
    fn due_date_accepts_unpadded_month_and_day() {
        let date = parse_due_date("2024-1-5").expect("unpadded date is valid");
        assert_eq!(format_due_date(date), "2024-01-05");
    }

    #[test]
    fn due_date_rejects_bad_shapes_and_days() {
        for value in [
            "2024/01/05",
            "20240105",
            "24-01-05",
            "12024-01-05",
            "2024-001-05",
            "2023-02-29",
            "2024-13-01",
            "",
        ] {
            let err = parse_due_date(value).expect_err("invalid date must fail");
            assert_eq!(err, ValidationError::InvalidDueDate(value.to_string()));
        }
    }
}
