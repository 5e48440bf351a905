use anyhow::Result;

use super::{build_workflow, open_dataset, Command};
use crate::config::LabelingWorkflowConfig;
use crate::store::FileMetadataStore;

pub struct LayoutCommand {
    pub project: Option<u64>,
    pub dataset: Option<u64>,
    config: LabelingWorkflowConfig,
}

impl LayoutCommand {
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

impl Command for LayoutCommand {
    fn execute(&self) -> Result<()> {
        let store = FileMetadataStore::new(&self.config.store.directory);
        let mut workflow = build_workflow(&self.config, store)?;
        open_dataset(&mut workflow, &self.config, self.project, self.dataset)?;
        println!("{}", serde_json::to_string_pretty(&workflow.get_layout())?);
        Ok(())
    }
}
