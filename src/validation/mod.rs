pub mod dates;
pub mod fields;
pub mod form;

pub use dates::{
    DateField, format_date_error, format_invalid_date_error, format_past_date_error,
    is_date_in_past, is_end_date_valid, is_valid_date, parse_date,
};
pub use fields::{EID_MAX_LEN, validate_project};
pub use form::{FieldErrors, FormMode, validate_dates};
