use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Blob, MetadataStore};
use crate::workflow::types::ProjectId;

/// Process-local store, used by tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    blobs: RefCell<HashMap<ProjectId, Blob>>,
    writes: Cell<usize>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project's document without counting it as a write
    pub fn with_blob(self, project_id: ProjectId, blob: Blob) -> Self {
        self.blobs.borrow_mut().insert(project_id, blob);
        self
    }

    /// Number of `put_blob` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn snapshot(&self, project_id: ProjectId) -> Option<Blob> {
        self.blobs.borrow().get(&project_id).cloned()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn get_blob(&self, project_id: ProjectId) -> Result<Blob> {
        Ok(self
            .blobs
            .borrow()
            .get(&project_id)
            .cloned()
            .unwrap_or_default())
    }

    fn put_blob(&self, project_id: ProjectId, blob: &Blob) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.blobs.borrow_mut().insert(project_id, blob.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_project_reads_as_empty() {
        let store = InMemoryMetadataStore::new();
        assert!(store.get_blob(1).unwrap().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_update_blob_reads_and_writes_once() {
        let mut seed = Blob::new();
        seed.insert("owner".to_string(), json!("qa"));
        let store = InMemoryMetadataStore::new().with_blob(3, seed);

        store
            .update_blob(3, &mut |blob| {
                blob.insert("reviewed".to_string(), json!(true));
                Ok(())
            })
            .unwrap();

        let blob = store.snapshot(3).unwrap();
        assert_eq!(blob["owner"], json!("qa"));
        assert_eq!(blob["reviewed"], json!(true));
        assert_eq!(store.write_count(), 1);
    }
}
