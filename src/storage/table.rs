use crate::core::{Project, ProjectId, StoreError, StoreResult, ValidatedProject};
use crate::query::{ProjectFilter, ProjectQuery};
use chrono::Utc;
use std::collections::HashMap;

/// Rows plus a unique index on `eid`.
///
/// Synchronous and lock-free; the stores wrap it in their own lock so every
/// check-then-write below runs as one step.
#[derive(Debug, Clone, Default)]
pub struct ProjectTable {
    rows: HashMap<ProjectId, Project>,
    eid_index: HashMap<String, ProjectId>,
}

impl ProjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from persisted rows, refusing duplicate ids or eids.
    pub fn from_projects(projects: Vec<Project>) -> StoreResult<Self> {
        let mut table = Self::new();
        for project in projects {
            if table.rows.contains_key(&project.id) {
                return Err(StoreError::Corrupt(format!(
                    "duplicate project id {}",
                    project.id
                )));
            }
            if table.eid_index.contains_key(&project.eid) {
                return Err(StoreError::Corrupt(format!(
                    "duplicate eid '{}'",
                    project.eid
                )));
            }
            table.eid_index.insert(project.eid.clone(), project.id);
            table.rows.insert(project.id, project);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, filter: &ProjectFilter) -> u64 {
        self.rows
            .values()
            .filter(|project| filter.matches(project))
            .count() as u64
    }

    pub fn find(&self, query: &ProjectQuery) -> Vec<Project> {
        query.apply(self.rows.values())
    }

    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.rows.get(&id).cloned()
    }

    pub fn insert(&mut self, fields: ValidatedProject) -> StoreResult<Project> {
        if self.eid_index.contains_key(&fields.eid) {
            return Err(StoreError::DuplicateEid(fields.eid));
        }

        let project = Project::new(ProjectId::new(), fields, Utc::now());
        self.eid_index.insert(project.eid.clone(), project.id);
        self.rows.insert(project.id, project.clone());
        Ok(project)
    }

    pub fn update(
        &mut self,
        id: ProjectId,
        fields: ValidatedProject,
    ) -> StoreResult<Option<Project>> {
        let Some(project) = self.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(owner) = self.eid_index.get(&fields.eid)
            && *owner != id
        {
            return Err(StoreError::DuplicateEid(fields.eid));
        }

        self.eid_index.remove(&project.eid);
        self.eid_index.insert(fields.eid.clone(), id);
        project.replace_fields(fields);
        Ok(Some(project.clone()))
    }

    pub fn remove(&mut self, id: ProjectId) -> bool {
        match self.rows.remove(&id) {
            Some(project) => {
                self.eid_index.remove(&project.eid);
                true
            }
            None => false,
        }
    }

    /// All rows, oldest first.
    pub fn projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.rows.values().cloned().collect();
        projects.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        projects
    }
}
