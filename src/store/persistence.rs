use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

use super::{Blob, MetadataStore};
use crate::workflow::types::{DatasetId, ProjectId, StepRecord};

/// Namespace key inside a project's custom data. Existing stored data uses
/// this exact string.
pub const WORKFLOW_TITLE: &str = "multi_team_labeling_workflow";

/// Errors that can occur while reading or writing workflow configurations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Store error: {0}")]
    Store(anyhow::Error),

    #[error("Workflow namespace in project {project_id} is not an object")]
    MalformedNamespace { project_id: ProjectId },

    #[error("Stored configuration for dataset {dataset_id} is not an object")]
    MalformedDataset { dataset_id: DatasetId },

    #[error("Stored record for step {step_key} is invalid: {source}")]
    MalformedRecord {
        step_key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<anyhow::Error> for PersistenceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<PersistenceError>() {
            Ok(inner) => inner,
            Err(err) => PersistenceError::Store(err),
        }
    }
}

/// Reads and writes `{dataset_id -> step_number -> record}` inside a
/// project's custom data.
pub struct WorkflowConfigStore;

impl WorkflowConfigStore {
    /// Stored records for one dataset, or `None` when nothing was saved.
    ///
    /// Only steps accepted by `known_step` are parsed, so records for steps
    /// this workflow does not have are skipped whatever their shape. Keys
    /// that are not step numbers are skipped as well.
    pub fn read_dataset<S: MetadataStore + ?Sized>(
        store: &S,
        project_id: ProjectId,
        dataset_id: DatasetId,
        known_step: impl Fn(u32) -> bool,
    ) -> Result<Option<BTreeMap<u32, StepRecord>>, PersistenceError> {
        let blob = store.get_blob(project_id)?;
        let Some(namespace) = blob.get(WORKFLOW_TITLE) else {
            return Ok(None);
        };
        let namespace = namespace
            .as_object()
            .ok_or(PersistenceError::MalformedNamespace { project_id })?;

        let Some(dataset) = namespace.get(&dataset_id.to_string()) else {
            return Ok(None);
        };
        let dataset = dataset
            .as_object()
            .ok_or(PersistenceError::MalformedDataset { dataset_id })?;
        if dataset.is_empty() {
            return Ok(None);
        }

        let mut records = BTreeMap::new();
        for (step_key, value) in dataset {
            let Ok(step_number) = step_key.parse::<u32>() else {
                warn!(dataset_id, step_key = %step_key, "Skipping stored entry with non-numeric step key");
                continue;
            };
            if !known_step(step_number) {
                info!(dataset_id, step_number, "Ignoring stored step not present in this workflow");
                continue;
            }
            let mut record: StepRecord =
                serde_json::from_value(value.clone()).map_err(|source| {
                    PersistenceError::MalformedRecord {
                        step_key: step_key.clone(),
                        source,
                    }
                })?;
            if record.step_number == 0 {
                record.step_number = step_number;
            }
            records.insert(step_number, record);
        }
        Ok(Some(records))
    }

    /// Replace one dataset's configuration wholesale. Other datasets and
    /// other top-level keys of the document are left untouched.
    pub fn write_dataset<S: MetadataStore + ?Sized>(
        store: &S,
        project_id: ProjectId,
        dataset_id: DatasetId,
        records: &BTreeMap<u32, StepRecord>,
    ) -> Result<(), PersistenceError> {
        let mut dataset = Map::new();
        for (step_number, record) in records {
            dataset.insert(step_number.to_string(), serde_json::to_value(record)?);
        }
        let mut dataset = Some(Value::Object(dataset));

        store.update_blob(project_id, &mut |blob: &mut Blob| {
            let namespace = blob
                .entry(WORKFLOW_TITLE)
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(namespace) = namespace.as_object_mut() else {
                return Err(PersistenceError::MalformedNamespace { project_id }.into());
            };
            if namespace.is_empty() {
                info!(project_id, "No existing workflow configuration found. Creating new one.");
            }
            if let Some(entry) = dataset.take() {
                namespace.insert(dataset_id.to_string(), entry);
            }
            Ok(())
        })?;

        info!(project_id, dataset_id, steps = records.len(), "Workflow configuration saved");
        Ok(())
    }
}
