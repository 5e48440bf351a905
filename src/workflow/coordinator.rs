// Workflow aggregate: owns every step, the stepper cursor and the bridge
// to project metadata. One instance per process, passed explicitly.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

use super::cursor::Cursor;
use super::layout::{Direction, Widget};
use super::step::WorkflowStep;
use super::traits::StepSelectors;
use super::types::*;
use crate::store::{MetadataStore, PersistenceError, WorkflowConfigStore};
use crate::telemetry::{create_workflow_span, generate_correlation_id};

pub const WORKFLOW_CARD_TITLE: &str = "Multi-Team Labeling Workflow";
pub const SETTINGS_CARD_TITLE: &str = "Settings";
pub const SAVE_WORKFLOW_LABEL: &str = "Save Workflow";
pub const LOAD_DATASET_LABEL: &str = "Load Dataset";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("A workflow needs at least one step, got {0}")]
    InvalidStepCount(u32),
    #[error("Workflow has no step {0}")]
    UnknownStep(u32),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct Workflow<S: MetadataStore> {
    steps: BTreeMap<u32, WorkflowStep>,
    cursor: Cursor,
    save_enabled: bool,
    store: S,
    project_id: Option<ProjectId>,
    dataset_id: Option<DatasetId>,
}

impl<S: MetadataStore> Workflow<S> {
    /// Build `step_count` steps, asking `selectors` for each step's widgets
    pub fn new(
        step_count: u32,
        store: S,
        mut selectors: impl FnMut(u32) -> StepSelectors,
    ) -> Result<Self, WorkflowError> {
        if step_count == 0 {
            return Err(WorkflowError::InvalidStepCount(step_count));
        }

        let steps = (1..=step_count)
            .map(|step_number| (step_number, WorkflowStep::new(step_number, selectors(step_number))))
            .collect();
        info!(step_count, "Workflow created");

        Ok(Self {
            steps,
            cursor: Cursor::new(step_count),
            save_enabled: false,
            store,
            project_id: None,
            dataset_id: None,
        })
    }

    pub fn step_count(&self) -> u32 {
        self.cursor.step_count()
    }

    pub fn active_step(&self) -> u32 {
        self.cursor.current()
    }

    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn step(&self, step_number: u32) -> Option<&WorkflowStep> {
        self.steps.get(&step_number)
    }

    pub fn steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps.values()
    }

    fn step_mut(&mut self, step_number: u32) -> Result<&mut WorkflowStep, WorkflowError> {
        self.steps
            .get_mut(&step_number)
            .ok_or(WorkflowError::UnknownStep(step_number))
    }

    /// Route a selection change to its step
    pub fn dispatch(&mut self, step_number: u32, event: StepEvent) -> Result<(), WorkflowError> {
        self.step_mut(step_number)?.handle(event);
        Ok(())
    }

    /// Operator pressed "Confirm Selection" on a step.
    ///
    /// A confirmed step stays active, so it can still be edited afterwards
    /// without later steps being re-validated.
    pub fn confirm(&mut self, step_number: u32) -> Result<ConfirmOutcome, WorkflowError> {
        let step = self.step_mut(step_number)?;
        if !step.confirm_enabled() {
            warn!(step_number, "Confirmation ignored: step is not active");
            return Ok(ConfirmOutcome::NotActive);
        }

        let report = step.validate();
        if !report.is_valid() {
            info!(step_number, errors = ?report.errors, "Workflow step validation failed");
            return Ok(ConfirmOutcome::Rejected(report));
        }

        let next_step = step_number + 1;
        info!(
            step_number,
            next_step, "Workflow step validated successfully. Proceeding to next step."
        );

        // A single-step workflow has nowhere to advance; its confirmation
        // is what unlocks saving.
        if self.step_count() == 1 && !self.save_enabled {
            self.enable_save();
        }

        Ok(self.set_active_step(next_step))
    }

    // Only reachable through a successful confirmation of the previous step
    fn set_active_step(&mut self, step_number: u32) -> ConfirmOutcome {
        if !self.cursor.contains(step_number) {
            warn!(step_number, step_count = self.step_count(), "Step number is out of range");
            return ConfirmOutcome::OutOfRange {
                requested: step_number,
            };
        }
        if !self.cursor.advance(step_number) {
            return ConfirmOutcome::AlreadyReached {
                cursor: self.cursor.current(),
            };
        }

        if step_number == self.step_count() {
            self.enable_save();
        }
        if let Some(step) = self.steps.get_mut(&step_number) {
            step.set_active(true);
        }
        ConfirmOutcome::Advanced { to: step_number }
    }

    fn enable_save(&mut self) {
        self.save_enabled = true;
        info!("Save workflow action enabled");
    }

    pub fn to_records(&self) -> BTreeMap<u32, StepRecord> {
        self.steps
            .iter()
            .map(|(step_number, step)| (*step_number, step.to_record()))
            .collect()
    }

    /// Restore every stored step that exists here; unknown steps are ignored
    pub fn from_records(&mut self, records: &BTreeMap<u32, StepRecord>) -> Vec<u32> {
        info!(count = records.len(), "Loading workflow steps from stored records");
        let mut restored = Vec::new();
        for (step_number, record) in records {
            match self.steps.get_mut(step_number) {
                Some(step) => {
                    info!(step_number, "Loading data for workflow step");
                    step.update_from_record(record);
                    restored.push(*step_number);
                }
                None => {
                    info!(step_number, "Ignoring stored step not present in this workflow");
                }
            }
        }
        restored
    }

    /// Persist every step under `project_id`/`dataset_id`, replacing any
    /// previous configuration for that dataset.
    pub fn save(
        &self,
        project_id: Option<ProjectId>,
        dataset_id: Option<DatasetId>,
    ) -> Result<SaveOutcome, WorkflowError> {
        let (Some(project_id), Some(dataset_id)) = (project_id, dataset_id) else {
            warn!(
                project_id = ?project_id,
                dataset_id = ?dataset_id,
                "Project or dataset not selected. Cannot save workflow."
            );
            return Ok(SaveOutcome::MissingSelection);
        };

        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("save", project_id, dataset_id, &correlation_id);
        let _enter = span.enter();

        let records = self.to_records();
        WorkflowConfigStore::write_dataset(&self.store, project_id, dataset_id, &records)?;
        info!("Workflow configuration saved successfully");
        Ok(SaveOutcome::Saved {
            steps: records.len(),
        })
    }

    /// Restore steps from the stored configuration, if there is one.
    /// A miss leaves every step as it was.
    pub fn load(
        &mut self,
        project_id: Option<ProjectId>,
        dataset_id: Option<DatasetId>,
    ) -> Result<LoadOutcome, WorkflowError> {
        let (Some(project_id), Some(dataset_id)) = (project_id, dataset_id) else {
            warn!(
                project_id = ?project_id,
                dataset_id = ?dataset_id,
                "Project or dataset not selected. Cannot load workflow."
            );
            return Ok(LoadOutcome::MissingSelection);
        };

        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("load", project_id, dataset_id, &correlation_id);
        let _enter = span.enter();

        let steps = &self.steps;
        let stored = WorkflowConfigStore::read_dataset(&self.store, project_id, dataset_id, |step| {
            steps.contains_key(&step)
        })?;
        match stored {
            Some(records) => {
                info!("Existing workflow configuration found. Loading...");
                let steps = self.from_records(&records);
                Ok(LoadOutcome::Loaded { steps })
            }
            None => {
                info!("No existing workflow configuration for this dataset");
                Ok(LoadOutcome::NotFound)
            }
        }
    }

    pub fn selected_project(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn selected_dataset(&self) -> Option<DatasetId> {
        self.dataset_id
    }

    pub fn select_project(&mut self, project_id: Option<ProjectId>) {
        info!(project_id = ?project_id, "Project selected");
        self.project_id = project_id;
    }

    /// Switching dataset pulls in whatever was saved for it
    pub fn select_dataset(
        &mut self,
        dataset_id: Option<DatasetId>,
    ) -> Result<LoadOutcome, WorkflowError> {
        info!(dataset_id = ?dataset_id, "Dataset changed");
        self.dataset_id = dataset_id;
        self.load(self.project_id, dataset_id)
    }

    pub fn save_selected(&self) -> Result<SaveOutcome, WorkflowError> {
        self.save(self.project_id, self.dataset_id)
    }

    /// "Load Dataset" button: make the first step accept confirmation
    pub fn load_dataset(&mut self) {
        if let Some(first) = self.steps.get_mut(&1) {
            first.set_active(true);
        }
    }

    pub fn get_layout(&self) -> Widget {
        let settings = Widget::Card {
            title: SETTINGS_CARD_TITLE.to_string(),
            content: Box::new(Widget::column(vec![
                Widget::SelectProject {
                    selected: self.project_id,
                },
                Widget::SelectDataset {
                    selected: self.dataset_id,
                },
                Widget::button(LOAD_DATASET_LABEL, true),
            ])),
            content_top_right: Some(Box::new(Widget::button(
                SAVE_WORKFLOW_LABEL,
                self.save_enabled,
            ))),
        };

        let stepper = Widget::Stepper {
            titles: (1..=self.step_count()).map(|i| format!("Team {i}")).collect(),
            widgets: self.steps.values().map(WorkflowStep::layout).collect(),
            active_step: self.active_step(),
        };

        // Settings sit beside the stepper
        Widget::Container {
            direction: Direction::Horizontal,
            widgets: vec![
                settings,
                Widget::card(WORKFLOW_CARD_TITLE, Widget::column(vec![stepper])),
            ],
        }
    }
}
