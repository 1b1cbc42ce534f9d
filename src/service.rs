//! Project use cases on top of a [`ProjectStore`].
//!
//! The service is the authoritative gate in front of persistence: every
//! create and update is validated here regardless of what a client already
//! checked.

use crate::core::{Project, ProjectId, ProjectInput, ServiceError, ServiceResult};
use crate::query::{ListParams, ListQuery, Pagination, ProjectPage};
use crate::storage::ProjectStore;
use crate::validation::validate_project;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    pub async fn list(&self, params: &ListParams) -> ServiceResult<ProjectPage> {
        let query = ListQuery::from_params(params).inspect_err(|err| {
            debug!(error = %err, "rejected listing parameters");
        })?;
        self.list_query(&query).await
    }

    pub async fn list_query(&self, query: &ListQuery) -> ServiceResult<ProjectPage> {
        let store_query = query.build();
        let total = self.store.count(&store_query.filter).await?;
        let projects = self.store.find(&store_query).await?;
        let pagination = Pagination::new(total, query, projects.len());

        debug!(
            search = query.search.as_deref().unwrap_or(""),
            sort_field = query.sort.field.as_str(),
            sort_direction = query.sort.direction.as_str(),
            page = query.page,
            limit = query.limit,
            total,
            "projects listed"
        );

        Ok(ProjectPage {
            projects,
            pagination,
        })
    }

    pub async fn create(&self, input: &ProjectInput) -> ServiceResult<Project> {
        let fields = validate_project(input).inspect_err(|err| {
            debug!(error = %err, "rejected project create");
        })?;

        let project = self.store.create(fields).await?;
        info!(id = %project.id, eid = %project.eid, "project created");
        Ok(project)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Project> {
        let project_id = parse_id(id)?;
        self.store
            .get(project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Validates before looking the project up, so a bad body is reported
    /// even for an unknown id.
    pub async fn update(&self, id: &str, input: &ProjectInput) -> ServiceResult<Project> {
        let fields = validate_project(input).inspect_err(|err| {
            debug!(id, error = %err, "rejected project update");
        })?;
        let project_id = parse_id(id)?;

        let project = self
            .store
            .update(project_id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found(id))?;
        info!(id = %project.id, eid = %project.eid, "project updated");
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let project_id = parse_id(id)?;
        if !self.store.delete(project_id).await? {
            return Err(ServiceError::not_found(id));
        }
        info!(id = %project_id, "project deleted");
        Ok(())
    }
}

/// A malformed id cannot name any stored project.
fn parse_id(raw: &str) -> ServiceResult<ProjectId> {
    raw.parse().map_err(|_| ServiceError::not_found(raw))
}
