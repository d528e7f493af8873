//! Date parsing, validation and formatting.
//!
//! Every component that touches dates goes through this module instead of
//! re-implementing date math. All functions are pure and total: bad input
//! comes back as `None` or a typed error, never a panic.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use thiserror::Error;

/// Accepted input formats, tried in order after the ISO fast path.
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

/// Why a date range failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("both start and end dates are required")]
    MissingDate,
    #[error("invalid date format")]
    InvalidDate,
    #[error("start date must be before end date")]
    InvertedRange,
    #[error("dates must be between 1900 and 2100")]
    OutOfBounds,
}

/// Earliest date the chart accepts.
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
}

/// Latest date the chart accepts.
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap()
}

/// Parses user-entered text into a calendar day.
///
/// The ISO form is tried first (including full RFC 3339 timestamps, of
/// which only the calendar day survives), then each fallback format in
/// order; the first successful parse wins. Returns `None` for anything
/// unparsable.
pub fn safe_parse(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }

    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    None
}

/// Accepts either an already-typed date or raw text.
///
/// A typed date passes through untouched; text goes through
/// [`safe_parse`]. This is the single entry point form code uses so that
/// editing and rendering agree on date semantics.
pub fn parse_value(native: Option<NaiveDate>, text: &str) -> Option<NaiveDate> {
    native.or_else(|| safe_parse(text))
}

/// Validates a start/end pair.
///
/// Checks run in order: presence, inversion, bounds. The result is meant
/// to be shown at the edit boundary; nothing here is ever thrown across
/// the rendering path.
pub fn validate_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), DateRangeError> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(DateRangeError::MissingDate),
    };

    if start > end {
        return Err(DateRangeError::InvertedRange);
    }

    if start < min_date() || end > max_date() {
        return Err(DateRangeError::OutOfBounds);
    }

    Ok(())
}

/// Form-level range validation over raw text fields.
///
/// Distinguishes an empty field (`MissingDate`) from an unparsable one
/// (`InvalidDate`); on success returns the parsed pair for the caller to
/// store.
pub fn validate_range_text(
    start_text: &str,
    end_text: &str,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    if start_text.trim().is_empty() || end_text.trim().is_empty() {
        return Err(DateRangeError::MissingDate);
    }

    let start = safe_parse(start_text).ok_or(DateRangeError::InvalidDate)?;
    let end = safe_parse(end_text).ok_or(DateRangeError::InvalidDate)?;

    validate_range(Some(start), Some(end))?;
    Ok((start, end))
}

/// Renders a date as zero-padded `yyyy-MM-dd` for edit fields, or an
/// empty string for `None`. The canonical inverse of [`safe_parse`]'s
/// ISO branch.
pub fn format_for_edit(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Default visible window: January 1 through December 31 of the current
/// year.
pub fn default_window() -> (NaiveDate, NaiveDate) {
    let year = Local::now().year();
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
    )
}
