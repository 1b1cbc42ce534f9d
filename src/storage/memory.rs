use super::{ProjectStore, ProjectTable};
use crate::core::{Project, ProjectId, StoreResult, ValidatedProject};
use crate::query::{ProjectFilter, ProjectQuery};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store. Contents are lost when the handle is dropped.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    table: RwLock<ProjectTable>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn count(&self, filter: &ProjectFilter) -> StoreResult<u64> {
        Ok(self.table.read().await.count(filter))
    }

    async fn find(&self, query: &ProjectQuery) -> StoreResult<Vec<Project>> {
        Ok(self.table.read().await.find(query))
    }

    async fn get(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.table.read().await.get(id))
    }

    async fn create(&self, fields: ValidatedProject) -> StoreResult<Project> {
        let project = self.table.write().await.insert(fields)?;
        debug!(id = %project.id, eid = %project.eid, "project inserted");
        Ok(project)
    }

    async fn update(
        &self,
        id: ProjectId,
        fields: ValidatedProject,
    ) -> StoreResult<Option<Project>> {
        self.table.write().await.update(id, fields)
    }

    async fn delete(&self, id: ProjectId) -> StoreResult<bool> {
        Ok(self.table.write().await.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StoreError;
    use crate::query::ListQuery;
    use chrono::NaiveDate;

    fn fields(eid: &str) -> ValidatedProject {
        ValidatedProject {
            name: "Apollo".to_string(),
            eid: eid.to_string(),
            description: "moon".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_basic_flow() {
        let store = InMemoryProjectStore::new();
        let created = store.create(fields("APL-1")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let page = store.find(&ListQuery::default().build()).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(store.count(&ProjectFilter::all()).await.unwrap(), 1);

        assert!(store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_eid_leaves_store_unchanged() {
        let store = InMemoryProjectStore::new();
        store.create(fields("APL-1")).await.unwrap();

        let err = store.create(fields("APL-1")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEid(eid) if eid == "APL-1"));
        assert_eq!(store.len().await, 1);
    }
}
