use anyhow::{anyhow, Context, Result};
use fd_lock::RwLock;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Blob, MetadataStore};
use crate::workflow::types::ProjectId;

/// One JSON document per project under a directory.
///
/// `update_blob` holds an exclusive file lock for the whole
/// read-modify-write, so concurrent processes serialize on a project.
#[derive(Debug, Clone)]
pub struct FileMetadataStore {
    directory: PathBuf,
}

impl FileMetadataStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn blob_path(&self, project_id: ProjectId) -> PathBuf {
        self.directory.join(format!("{project_id}.json"))
    }

    fn lock_path(&self, project_id: ProjectId) -> PathBuf {
        self.directory.join(format!("{project_id}.lock"))
    }

    fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("Failed to create store directory {}", self.directory.display())
        })
    }
}

impl MetadataStore for FileMetadataStore {
    fn get_blob(&self, project_id: ProjectId) -> Result<Blob> {
        let path = self.blob_path(project_id);
        if !path.exists() {
            debug!(project_id, file = ?path, "No custom data stored for project");
            return Ok(Blob::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(blob) => Ok(blob),
            other => Err(anyhow!(
                "Custom data for project {project_id} is not a JSON object: {other}"
            )),
        }
    }

    fn put_blob(&self, project_id: ProjectId, blob: &Blob) -> Result<()> {
        self.ensure_directory()?;
        let path = self.blob_path(project_id);
        let serialized = serde_json::to_string_pretty(blob)?;

        // Write to temporary file first, then rename
        let temp_file = path.with_extension("json.tmp");
        fs::write(&temp_file, serialized)
            .with_context(|| format!("Failed to write {}", temp_file.display()))?;
        fs::rename(&temp_file, &path)?;

        info!(project_id, file = ?path, "Project custom data written");
        Ok(())
    }

    fn update_blob(
        &self,
        project_id: ProjectId,
        apply: &mut dyn FnMut(&mut Blob) -> Result<()>,
    ) -> Result<()> {
        self.ensure_directory()?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(project_id))?;
        let mut lock = RwLock::new(lock_file);
        let _guard = lock
            .write()
            .map_err(|e| anyhow!("Failed to lock custom data for project {project_id}: {e}"))?;

        let mut blob = self.get_blob(project_id)?;
        apply(&mut blob)?;
        self.put_blob(project_id, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_blob_survives_a_new_store_instance() {
        let dir = TempDir::new().unwrap();
        let mut blob = Blob::new();
        blob.insert("labels".to_string(), json!(["car"]));

        FileMetadataStore::new(dir.path()).put_blob(9, &blob).unwrap();
        let reread = FileMetadataStore::new(dir.path()).get_blob(9).unwrap();

        assert_eq!(reread, blob);
        assert!(!dir.path().join("9.json.tmp").exists());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileMetadataStore::new(dir.path().join("nested"));
        assert!(store.get_blob(1).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("4.json"), "[1, 2]").unwrap();

        let err = FileMetadataStore::new(dir.path()).get_blob(4).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_update_blob_keeps_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileMetadataStore::new(dir.path());
        let mut blob = Blob::new();
        blob.insert("owner".to_string(), json!("qa"));
        store.put_blob(2, &blob).unwrap();

        store
            .update_blob(2, &mut |blob| {
                blob.insert("stage".to_string(), json!("review"));
                Ok(())
            })
            .unwrap();

        let reread = store.get_blob(2).unwrap();
        assert_eq!(reread["owner"], json!("qa"));
        assert_eq!(reread["stage"], json!("review"));
    }
}
