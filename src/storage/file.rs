// ============================================================================
// JSON snapshot store
// ============================================================================
//
// The whole table lives in memory and is written to a single JSON file after
// every mutation. Writes go to a temporary file in the target directory, are
// fsynced, then renamed over the snapshot, so readers never observe a torn
// file. A mutation is applied to a copy of the table and only swapped in once
// the snapshot is on disk.
//
// ============================================================================

use super::{ProjectStore, ProjectTable};
use crate::core::{Project, ProjectId, StoreError, StoreResult, ValidatedProject};
use crate::query::{ProjectFilter, ProjectQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    saved_at: DateTime<Utc>,
    projects: Vec<Project>,
}

pub struct FileProjectStore {
    path: PathBuf,
    table: RwLock<ProjectTable>,
}

impl FileProjectStore {
    /// Opens the snapshot at `path`. A missing file is an empty store; the
    /// file is created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table = read_snapshot(&path)?;
        info!(path = %path.display(), projects = table.len(), "project snapshot loaded");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn mutate<R>(
        &self,
        apply: impl FnOnce(&mut ProjectTable) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let result = apply(&mut next)?;

        if let Err(err) = write_snapshot(&self.path, &next) {
            error!(path = %self.path.display(), error = %err, "failed to write project snapshot");
            return Err(err);
        }

        *table = next;
        Ok(result)
    }
}

#[async_trait]
impl ProjectStore for FileProjectStore {
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
        self.mutate(|table| table.insert(fields)).await
    }

    async fn update(
        &self,
        id: ProjectId,
        fields: ValidatedProject,
    ) -> StoreResult<Option<Project>> {
        if self.table.read().await.get(id).is_none() {
            return Ok(None);
        }
        self.mutate(|table| table.update(id, fields)).await
    }

    async fn delete(&self, id: ProjectId) -> StoreResult<bool> {
        if self.table.read().await.get(id).is_none() {
            return Ok(false);
        }
        self.mutate(|table| Ok(table.remove(id))).await
    }
}

fn read_snapshot(path: &Path) -> StoreResult<ProjectTable> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ProjectTable::new()),
        Err(err) => return Err(err.into()),
    };

    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StoreError::Corrupt(format!(
            "unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }

    ProjectTable::from_projects(snapshot.projects)
}

fn write_snapshot(path: &Path, table: &ProjectTable) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        projects: table.projects(),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| StoreError::Io(err.error))?;

    debug!(path = %path.display(), projects = snapshot.projects.len(), "project snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn fields(eid: &str) -> ValidatedProject {
        ValidatedProject {
            name: "Gemini".to_string(),
            eid: eid.to_string(),
            description: "orbital".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileProjectStore::open(dir.path().join("none.json")).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"{"version": 99, "saved_at": "2025-01-01T00:00:00Z", "projects": []}"#,
        )
        .unwrap();

        assert!(matches!(
            FileProjectStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_writes_snapshot_in_nested_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("projects.json");
        let store = FileProjectStore::open(&path).unwrap();

        store.create(fields("GEM-1")).await.unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("GEM-1"));
        assert!(raw.contains("\"startDate\": \"2025-03-01\""));
    }
}
