// ============================================================================
// Project Tracker Library
// ============================================================================

pub mod config;
pub mod core;
pub mod debounce;
pub mod query;
pub mod service;
pub mod storage;
pub mod validation;
pub mod web;

// Re-export main types for convenience
pub use core::{
    Project, ProjectId, ProjectInput, ServiceError, StoreError, ValidatedProject, ValidationError,
};
pub use query::{ListParams, ListQuery, Pagination, ProjectPage, SortDirection, SortField, SortSpec};
pub use service::ProjectService;
pub use storage::{FileProjectStore, InMemoryProjectStore, ProjectStore};
pub use web::{AppState, build_router};
