use anyhow::Result;

use super::Command;
use crate::config::LabelingWorkflowConfig;
use crate::store::{FileMetadataStore, WorkflowConfigStore};

/// Prints the stored records as saved, without checking them against the
/// current catalog
pub struct ShowCommand {
    pub project: Option<u64>,
    pub dataset: Option<u64>,
    config: LabelingWorkflowConfig,
}

impl ShowCommand {
    pub fn new(config: LabelingWorkflowConfig) -> Self {
        Self {
            project: None,
            dataset: None,
            config,
        }
    }

    pub fn with_target(mut self, project: Option<u64>, dataset: Option<u64>) -> Self {
        self.project = project;
        self.dataset = dataset;
        self
    }
}

impl Command for ShowCommand {
    fn execute(&self) -> Result<()> {
        let project = self.project.or(self.config.context.project_id);
        let dataset = self.dataset.or(self.config.context.dataset_id);
        let (Some(project_id), Some(dataset_id)) = (project, dataset) else {
            println!("⚠️  Project or dataset not selected");
            return Ok(());
        };

        let store = FileMetadataStore::new(&self.config.store.directory);
        let Some(records) = WorkflowConfigStore::read_dataset(&store, project_id, dataset_id, |_| true)?
        else {
            println!("📂 No stored configuration for this dataset yet");
            return Ok(());
        };

        println!("📂 Stored configuration for project {project_id}, dataset {dataset_id}");
        println!();
        println!("🏷️  MULTI-TEAM LABELING WORKFLOW");
        println!("================================");
        for (step_number, record) in records {
            println!("Team {step_number}:");
            println!("   🗂️  Workspace: {:?} (team {:?})", record.workspace_id, record.team_id);
            println!("   🎨 Classes: {}", record.class_names().join(", "));
            println!("   🔎 Reviewers: {:?}", record.reviewer_ids);
            println!("   ✏️  Labelers: {:?}", record.labeler_ids);
        }
        Ok(())
    }
}
