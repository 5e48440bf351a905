use anyhow::{Context, Result};
use std::rc::Rc;

use crate::catalog::CatalogSnapshot;
use crate::config::LabelingWorkflowConfig;
use crate::store::MetadataStore;
use crate::workflow::types::{DatasetId, ProjectId};
use crate::workflow::{LoadOutcome, Workflow};

pub mod init_config;
pub mod layout;
pub mod plan;
pub mod show;

pub trait Command {
    fn execute(&self) -> Result<()>;
}

/// Build a workflow over `store` with selectors backed by the configured catalog
pub fn build_workflow<S: MetadataStore>(
    config: &LabelingWorkflowConfig,
    store: S,
) -> Result<Workflow<S>> {
    let catalog = Rc::new(
        CatalogSnapshot::from_file(&config.catalog.path)
            .with_context(|| "Export the platform catalog or set LABELING_WORKFLOW__CATALOG__PATH")?,
    );
    let workflow = Workflow::new(config.workflow.number_of_teams, store, |_| {
        CatalogSnapshot::selectors(&catalog)
    })?;
    Ok(workflow)
}

/// Point the workflow at a project/dataset, falling back to the launch context,
/// and pull in whatever was stored for it.
pub fn open_dataset<S: MetadataStore>(
    workflow: &mut Workflow<S>,
    config: &LabelingWorkflowConfig,
    project: Option<ProjectId>,
    dataset: Option<DatasetId>,
) -> Result<LoadOutcome> {
    workflow.select_project(project.or(config.context.project_id));
    let outcome = workflow.select_dataset(dataset.or(config.context.dataset_id))?;
    match &outcome {
        LoadOutcome::Loaded { steps } => println!("📂 Loaded stored configuration for steps {steps:?}"),
        LoadOutcome::NotFound => println!("📂 No stored configuration for this dataset yet"),
        LoadOutcome::MissingSelection => println!("⚠️  Project or dataset not selected"),
    }
    Ok(outcome)
}
