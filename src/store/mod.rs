// Project metadata storage
//
// The labeling platform keeps one free-form JSON document per project.
// Workflow configurations live inside it under a fixed namespace key.

pub mod file;
pub mod memory;
pub mod persistence;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::workflow::types::ProjectId;

pub use file::FileMetadataStore;
pub use memory::InMemoryMetadataStore;
pub use persistence::{PersistenceError, WorkflowConfigStore, WORKFLOW_TITLE};

pub type Blob = Map<String, Value>;

/// Whole-document access to a project's custom data
pub trait MetadataStore {
    /// Read the project's document; a project with no data yields an empty map
    fn get_blob(&self, project_id: ProjectId) -> Result<Blob>;

    /// Replace the project's document
    fn put_blob(&self, project_id: ProjectId, blob: &Blob) -> Result<()>;

    /// Read, modify and write back one document.
    ///
    /// Stores that can serialize writers override this so the three steps
    /// form a critical section.
    fn update_blob(
        &self,
        project_id: ProjectId,
        apply: &mut dyn FnMut(&mut Blob) -> Result<()>,
    ) -> Result<()> {
        let mut blob = self.get_blob(project_id)?;
        apply(&mut blob)?;
        self.put_blob(project_id, &blob)
    }
}

impl<S: MetadataStore + ?Sized> MetadataStore for &S {
    fn get_blob(&self, project_id: ProjectId) -> Result<Blob> {
        (**self).get_blob(project_id)
    }

    fn put_blob(&self, project_id: ProjectId, blob: &Blob) -> Result<()> {
        (**self).put_blob(project_id, blob)
    }

    fn update_blob(
        &self,
        project_id: ProjectId,
        apply: &mut dyn FnMut(&mut Blob) -> Result<()>,
    ) -> Result<()> {
        (**self).update_blob(project_id, apply)
    }
}
