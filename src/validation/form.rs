//! Live (advisory) validation for project forms.
//!
//! Front ends run this on every change of a date input to show messages next
//! to the fields. Nothing here gates persistence; the service re-validates
//! every submission with [`super::fields::validate_project`].

use super::dates::{
    DateField, format_date_error, format_invalid_date_error, format_past_date_error,
    is_date_in_past_on, is_end_date_valid, is_valid_date,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

/// Which form is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New project: dates in the past are flagged.
    Create,
    /// Existing project: past dates are allowed.
    Edit,
}

/// Field key (`startDate` / `endDate`) to message.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub fn validate_dates(mode: FormMode, start: &str, end: &str) -> FieldErrors {
    validate_dates_on(mode, start, end, Local::now().date_naive())
}

pub fn validate_dates_on(mode: FormMode, start: &str, end: &str, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, value) in [(DateField::Start, start), (DateField::End, end)] {
        // untouched inputs stay quiet
        if value.trim().is_empty() {
            continue;
        }

        if !is_valid_date(value) {
            errors.insert(field.key(), format_invalid_date_error(field.label()));
        } else if mode == FormMode::Create && is_date_in_past_on(value, today) {
            errors.insert(field.key(), format_past_date_error(field.label()));
        }
    }

    if is_valid_date(start) && is_valid_date(end) && !is_end_date_valid(start, end) {
        errors.insert(DateField::End.key(), format_date_error());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn empty_form_has_no_errors() {
        assert!(validate_dates_on(FormMode::Create, "", "", today()).is_empty());
    }

    #[test]
    fn create_flags_past_dates() {
        let errors = validate_dates_on(FormMode::Create, "2025-06-14", "2025-06-20", today());
        assert_eq!(
            errors.get("startDate").map(String::as_str),
            Some("The start date cannot be in the past")
        );
        assert!(!errors.contains_key("endDate"));
    }

    #[test]
    fn edit_allows_past_dates() {
        let errors = validate_dates_on(FormMode::Edit, "2020-01-01", "2020-02-01", today());
        assert!(errors.is_empty());
    }

    #[test]
    fn invalid_date_is_reported_per_field() {
        let errors = validate_dates_on(FormMode::Edit, "2025-02-30", "", today());
        assert_eq!(
            errors.get("startDate").map(String::as_str),
            Some("Please enter a valid date for the start date")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn ordering_error_wins_on_end_date() {
        let errors = validate_dates_on(FormMode::Create, "2025-07-10", "2025-07-01", today());
        assert_eq!(
            errors.get("endDate").map(String::as_str),
            Some(format_date_error().as_str())
        );
        assert!(!errors.contains_key("startDate"));
    }

    #[test]
    fn ordering_replaces_past_message_on_end_date() {
        let errors = validate_dates_on(FormMode::Create, "2025-06-20", "2025-06-01", today());
        assert_eq!(errors.get("endDate"), Some(&format_date_error()));
    }
}
