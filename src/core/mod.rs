pub mod error;
pub mod types;

pub use error::{
    DUPLICATE_EID_MESSAGE, ServiceError, ServiceResult, StoreError, StoreResult, ValidationError,
};
pub use types::{Project, ProjectId, ProjectInput, ValidatedProject};
