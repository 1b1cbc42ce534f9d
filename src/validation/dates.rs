//! Calendar-date rules shared by the create and edit flows.
//!
//! Every rule goes through [`parse_date`], so the live form checks in
//! [`super::form`] and the authoritative checks in [`super::fields`] agree on
//! what counts as a date.
//!
//! Accepted inputs are `YYYY-MM-DD` and RFC 3339 timestamps (the date part in
//! the timestamp's own offset is used). Impossible calendar dates such as
//! `2025-02-30` are rejected rather than rolled over into the next month.

use chrono::{DateTime, Local, NaiveDate};

/// Wire format of project dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two date fields of a project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    /// Human-readable name used inside error messages.
    pub fn label(self) -> &'static str {
        match self {
            DateField::Start => "start date",
            DateField::End => "end date",
        }
    }

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            DateField::Start => "startDate",
            DateField::End => "endDate",
        }
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// True iff `text` is a real calendar date.
pub fn is_valid_date(text: &str) -> bool {
    parse_date(text).is_some()
}

/// True iff `text` is a date strictly before today (local time).
///
/// Unparseable input is never in the past.
pub fn is_date_in_past(text: &str) -> bool {
    is_date_in_past_on(text, Local::now().date_naive())
}

/// Same as [`is_date_in_past`] with an explicit "today".
pub fn is_date_in_past_on(text: &str, today: NaiveDate) -> bool {
    parse_date(text).is_some_and(|date| date < today)
}

/// True iff both dates parse and `start <= end`.
pub fn is_end_date_valid(start: &str, end: &str) -> bool {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => start <= end,
        _ => false,
    }
}

pub fn format_date_error() -> String {
    "The end date must be on or after the start date".to_string()
}

pub fn format_invalid_date_error(field: &str) -> String {
    format!("Please enter a valid date for the {field}")
}

pub fn format_past_date_error(field: &str) -> String {
    format!("The {field} cannot be in the past")
}
