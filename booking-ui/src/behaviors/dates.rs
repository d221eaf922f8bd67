//! Minimum travel-date enforcement.
//!
//! Two inputs carry the rule. `#travel-date` only gets its `min` refreshed
//! on focus, and only on pages that publish date inventory.
//! `#travel_date` gets `min` once at load and also rejects past dates on
//! change.

use chrono::NaiveDate;

pub const INVENTORY_DATE_ID: &str = "travel-date";

pub const PAST_DATE_NOTICE: &str = "Please select a future date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value for a date input's `min` attribute.
pub fn min_attr(today: NaiveDate) -> String {
    today.format(DATE_FORMAT).to_string()
}

/// Outcome of checking a chosen travel date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateVerdict {
    /// On or after the minimum.
    Accepted,
    /// Strictly before the minimum; the field should be cleared.
    Past,
    /// Empty or not a `YYYY-MM-DD` date; left alone.
    Unreadable,
}

/// Compare a date input's value against the minimum date.
pub fn check_travel_date(value: &str, min: NaiveDate) -> DateVerdict {
    match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
        Ok(date) if date < min => DateVerdict::Past,
        Ok(_) => DateVerdict::Accepted,
        Err(_) => DateVerdict::Unreadable,
    }
}
