//! Strict ISO 8601 validation for the admin task surface.
//!
//! The public listing endpoint shrugs off malformed input; this module is
//! the deliberate opposite. Admin date windows must be exact, so missing
//! or unparseable values are hard errors carrying the offending field
//! name, with the rejected value echoed back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

/// Error from [`parse_iso8601`]: the input matched no accepted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid ISO 8601 string: {0}")]
pub struct InvalidIso8601(pub String);

/// Parse an ISO 8601 date or datetime into a UTC instant.
///
/// Accepted forms: `YYYY-MM-DD` (taken as midnight UTC); a datetime with
/// `T` or a single space between date and time; `HH:MM` or `HH:MM:SS`
/// time, optionally with fractional seconds; an optional `Z` or `±HH:MM`
/// offset (offset forms require seconds, per RFC 3339). Values without
/// an offset are taken as UTC.
///
/// # Errors
///
/// Returns [`InvalidIso8601`] when the value matches none of the accepted
/// forms, including calendar-invalid dates such as `2023-02-29`.
pub fn parse_iso8601(value: &str) -> Result<DateTime<Utc>, InvalidIso8601> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    // RFC 3339 insists on a `T` separator; the space variant is accepted
    // by swapping the first space only.
    let candidate = value.replacen(' ', "T", 1);

    if let Ok(datetime) = DateTime::parse_from_rfc3339(&candidate) {
        return Ok(datetime.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&candidate, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(InvalidIso8601(value.to_string()))
}

/// Which query parameter a [`DateRangeError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    StartDate,
    EndDate,
}

impl DateField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        }
    }
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for the admin date window.
///
/// The `Display` output is the exact message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("{0} is required")]
    Missing(DateField),
    #[error("{field} must be a valid ISO 8601 string, got: {got}")]
    Invalid { field: DateField, got: String },
}

/// A validated admin date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Strict normalizer for the admin task-status window.
///
/// Both fields are required; an empty string counts as missing. `start`
/// is checked before `end`, so a request failing on both reports
/// `start_date` first.
///
/// # Errors
///
/// Returns [`DateRangeError::Missing`] for an absent or empty field and
/// [`DateRangeError::Invalid`] for a value [`parse_iso8601`] rejects.
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, DateRangeError> {
    let start = parse_field(DateField::StartDate, start)?;
    let end = parse_field(DateField::EndDate, end)?;
    Ok(DateRange { start, end })
}

fn parse_field(field: DateField, raw: Option<&str>) -> Result<DateTime<Utc>, DateRangeError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or(DateRangeError::Missing(field))?;
    parse_iso8601(raw).map_err(|InvalidIso8601(got)| DateRangeError::Invalid { field, got })
}
