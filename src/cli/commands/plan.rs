use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use super::{build_workflow, open_dataset, Command};
use crate::config::LabelingWorkflowConfig;
use crate::store::{FileMetadataStore, InMemoryMetadataStore, MetadataStore};
use crate::workflow::types::{UserId, WorkspaceId};
use crate::workflow::{ConfirmOutcome, SaveOutcome, StepEvent, Workflow};

/// What the operator would pick for every team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub teams: Vec<TeamPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlan {
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub reviewers: Vec<UserId>,
    #[serde(default)]
    pub labelers: Vec<UserId>,
}

impl WorkflowPlan {
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan {}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Feed a plan through the workflow exactly as an operator would: select,
/// then confirm, one team at a time. Stops at the first rejected step.
pub fn apply_plan<S: MetadataStore>(
    workflow: &mut Workflow<S>,
    plan: &WorkflowPlan,
) -> Result<Vec<(u32, ConfirmOutcome)>> {
    if plan.teams.len() > workflow.step_count() as usize {
        warn!(
            planned = plan.teams.len(),
            step_count = workflow.step_count(),
            "Plan has more teams than the workflow; extra teams are ignored"
        );
    }

    let mut outcomes = Vec::new();
    for (index, team) in plan.teams.iter().take(workflow.step_count() as usize).enumerate() {
        let step_number = index as u32 + 1;
        workflow.dispatch(step_number, StepEvent::WorkspaceSelected(Some(team.workspace_id)))?;
        workflow.dispatch(step_number, StepEvent::ClassesSelected(team.classes.clone()))?;
        workflow.dispatch(step_number, StepEvent::ReviewersSelected(team.reviewers.clone()))?;
        workflow.dispatch(step_number, StepEvent::LabelersSelected(team.labelers.clone()))?;

        let outcome = workflow.confirm(step_number)?;
        let rejected = matches!(outcome, ConfirmOutcome::Rejected(_) | ConfirmOutcome::NotActive);
        outcomes.push((step_number, outcome));
        if rejected {
            break;
        }
    }
    Ok(outcomes)
}

pub struct PlanCommand {
    pub file: PathBuf,
    pub project: Option<u64>,
    pub dataset: Option<u64>,
    pub dry_run: bool,
    config: LabelingWorkflowConfig,
}

impl PlanCommand {
    pub fn new(file: PathBuf, config: LabelingWorkflowConfig) -> Self {
        Self {
            file,
            project: None,
            dataset: None,
            dry_run: false,
            config,
        }
    }

    pub fn with_target(mut self, project: Option<u64>, dataset: Option<u64>) -> Self {
        self.project = project;
        self.dataset = dataset;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn run<S: MetadataStore>(&self, store: S) -> Result<()> {
        let plan = WorkflowPlan::from_file(&self.file)?;
        let mut workflow = build_workflow(&self.config, store)?;
        open_dataset(&mut workflow, &self.config, self.project, self.dataset)?;
        workflow.load_dataset();

        println!("🧭 Applying plan for {} team(s)", plan.teams.len());
        for (step_number, outcome) in apply_plan(&mut workflow, &plan)? {
            let summary = workflow
                .step(step_number)
                .map(|s| s.summary_text().to_string())
                .unwrap_or_default();
            match outcome {
                ConfirmOutcome::Rejected(_) => println!("❌ Team {step_number}: {summary}"),
                ConfirmOutcome::NotActive => println!("⏸️  Team {step_number}: step is not active"),
                _ => println!("✅ Team {step_number}: {summary}"),
            }
        }

        if !workflow.save_enabled() {
            bail!(
                "Workflow is incomplete: reached team {} of {}",
                workflow.active_step(),
                workflow.step_count()
            );
        }

        match workflow.save_selected()? {
            SaveOutcome::Saved { steps } if self.dry_run => {
                println!("🔍 Dry run: {steps} step(s) validated, nothing written")
            }
            SaveOutcome::Saved { steps } => println!("💾 Saved {steps} step(s)"),
            SaveOutcome::MissingSelection => bail!("Project or dataset not selected. Cannot save workflow."),
        }
        Ok(())
    }
}

impl Command for PlanCommand {
    fn execute(&self) -> Result<()> {
        let store = FileMetadataStore::new(&self.config.store.directory);
        if self.dry_run {
            // Start from what is on disk, write only to memory
            let project = self.project.or(self.config.context.project_id);
            let seeded = match project {
                Some(project_id) => {
                    InMemoryMetadataStore::new().with_blob(project_id, store.get_blob(project_id)?)
                }
                None => InMemoryMetadataStore::new(),
            };
            self.run(seeded)
        } else {
            self.run(store)
        }
    }
}
