use crate::validation::dates::{self, DateField};
use thiserror::Error;

/// Message returned when an eid is already taken by another project.
pub const DUPLICATE_EID_MESSAGE: &str =
    "A project with this EID already exists. Please use another identifier.";

/// Rejected user input. Always recoverable by correcting the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("{}", dates::format_invalid_date_error(.field.label()))]
    InvalidDate { field: DateField },

    #[error("{}", dates::format_date_error())]
    EndBeforeStart,

    #[error("{0}")]
    InvalidQuery(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate eid '{0}'")]
    DuplicateEid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(String),

    #[error("Project '{0}' not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl ServiceError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEid(_) => Self::Conflict(DUPLICATE_EID_MESSAGE.to_string()),
            other => Self::Storage(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
