pub mod file;
pub mod memory;
pub mod table;

pub use file::FileProjectStore;
pub use memory::InMemoryProjectStore;
pub use table::ProjectTable;

use crate::core::{Project, ProjectId, StoreResult, ValidatedProject};
use crate::query::{ProjectFilter, ProjectQuery};
use async_trait::async_trait;

/// Persistence collaborator for projects.
///
/// Implementations own eid uniqueness: `create` and `update` must check and
/// write atomically and fail with [`crate::core::StoreError::DuplicateEid`]
/// when another project already holds the eid.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Number of projects matching `filter`, ignoring any page window.
    async fn count(&self, filter: &ProjectFilter) -> StoreResult<u64>;

    /// Matching projects, ordered and windowed.
    async fn find(&self, query: &ProjectQuery) -> StoreResult<Vec<Project>>;

    async fn get(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    /// Persists a new project with a fresh id and creation timestamp.
    async fn create(&self, fields: ValidatedProject) -> StoreResult<Project>;

    /// Replaces the editable fields. `Ok(None)` when `id` is unknown.
    async fn update(&self, id: ProjectId, fields: ValidatedProject)
    -> StoreResult<Option<Project>>;

    /// Removes the project. `Ok(false)` when `id` is unknown.
    async fn delete(&self, id: ProjectId) -> StoreResult<bool>;
}
