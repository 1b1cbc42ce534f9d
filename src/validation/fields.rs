use super::dates::{self, DateField};
use crate::core::{ProjectInput, ValidatedProject, ValidationError};

/// Upper bound on the external identifier, in characters.
pub const EID_MAX_LEN: usize = 20;

/// Authoritative checks run before any create or update reaches the store.
///
/// The first failing rule is reported. Past dates are accepted here; that
/// rule only exists in the create form.
pub fn validate_project(input: &ProjectInput) -> Result<ValidatedProject, ValidationError> {
    let name = required("name", &input.name)?;
    let eid = required("eid", &input.eid)?;
    if eid.chars().count() > EID_MAX_LEN {
        return Err(ValidationError::FieldTooLong {
            field: "eid",
            max: EID_MAX_LEN,
        });
    }
    let description = required("description", &input.description)?;

    let start_date = dates::parse_date(&input.start_date).ok_or(ValidationError::InvalidDate {
        field: DateField::Start,
    })?;
    let end_date = dates::parse_date(&input.end_date).ok_or(ValidationError::InvalidDate {
        field: DateField::End,
    })?;
    if !dates::is_end_date_valid(&input.start_date, &input.end_date) {
        return Err(ValidationError::EndBeforeStart);
    }

    Ok(ValidatedProject {
        name: name.to_string(),
        eid: eid.to_string(),
        description: description.to_string(),
        start_date,
        end_date,
    })
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}
