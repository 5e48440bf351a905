use tracing::{debug, info, warn};

use super::layout::Widget;
use super::traits::{ClassCatalog, SelectionProvider, StepSelectors, UserCatalog};
use super::types::*;

const CONFIRM_LABEL: &str = "Confirm Selection";

/// One team's slice of the workflow: workspace, classes, reviewers, labelers
pub struct WorkflowStep {
    step_number: u32,
    pub team_id: Option<TeamId>,
    pub workspace_id: Option<WorkspaceId>,
    pub project_id: Option<ProjectId>,
    pub dataset_id: Option<DatasetId>,
    workspace_selector: Box<dyn SelectionProvider>,
    class_selector: Box<dyn ClassCatalog>,
    reviewer_selector: Box<dyn UserCatalog>,
    labeler_selector: Box<dyn UserCatalog>,
    active: bool,
    summary_text: String,
    summary_status: TextStatus,
}

impl WorkflowStep {
    /// Build a step around its selectors. Only step 1 starts active.
    pub fn new(step_number: u32, selectors: StepSelectors) -> Self {
        let StepSelectors {
            workspace,
            classes,
            reviewers,
            labelers,
        } = selectors;

        let step = Self {
            step_number,
            team_id: None,
            workspace_id: None,
            project_id: None,
            dataset_id: None,
            workspace_selector: workspace,
            class_selector: classes,
            reviewer_selector: reviewers,
            labeler_selector: labelers,
            active: step_number == 1,
            summary_text: String::new(),
            summary_status: TextStatus::default(),
        };
        debug!(step_number, active = step.active, "Workflow step created");
        step
    }

    pub fn step_number(&self) -> u32 {
        self.step_number
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Gate the confirm input. Selections are left as they are.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            info!(step_number = self.step_number, "Workflow step is now active");
        } else {
            debug!(step_number = self.step_number, "Workflow step deactivated");
        }
    }

    pub fn confirm_enabled(&self) -> bool {
        self.active
    }

    pub fn summary_text(&self) -> &str {
        &self.summary_text
    }

    pub fn summary_status(&self) -> TextStatus {
        self.summary_status
    }

    pub fn workspace_selector(&self) -> &dyn SelectionProvider {
        self.workspace_selector.as_ref()
    }

    pub fn class_selector(&self) -> &dyn ClassCatalog {
        self.class_selector.as_ref()
    }

    pub fn reviewer_selector(&self) -> &dyn UserCatalog {
        self.reviewer_selector.as_ref()
    }

    pub fn labeler_selector(&self) -> &dyn UserCatalog {
        self.labeler_selector.as_ref()
    }

    /// Deliver a selection change from the widget host
    pub fn handle(&mut self, event: StepEvent) {
        match event {
            StepEvent::WorkspaceSelected(workspace_id) => {
                self.workspace_selector.select(workspace_id);
                self.on_workspace_changed(workspace_id);
            }
            StepEvent::ClassesSelected(names) => {
                let selected = self.class_selector.resolve_by_name(&names);
                debug!(
                    step_number = self.step_number,
                    requested = names.len(),
                    selected = selected.len(),
                    "Classes selected"
                );
            }
            StepEvent::ReviewersSelected(ids) => {
                self.reviewer_selector.select_by_ids(self.team_id, &ids);
                debug!(step_number = self.step_number, reviewers = ?ids, "Reviewers selected");
            }
            StepEvent::LabelersSelected(ids) => {
                self.labeler_selector.select_by_ids(self.team_id, &ids);
                debug!(step_number = self.step_number, labelers = ?ids, "Labelers selected");
            }
        }
    }

    // User pools are team scoped, so both pickers follow the workspace's team.
    fn on_workspace_changed(&mut self, workspace_id: Option<WorkspaceId>) {
        let team_id = self.workspace_selector.team_id();
        self.reviewer_selector.scope_to_team(team_id);
        self.labeler_selector.scope_to_team(team_id);

        self.team_id = team_id;
        self.workspace_id = workspace_id;
        info!(
            step_number = self.step_number,
            team_id = ?team_id,
            workspace_id = ?workspace_id,
            "Workflow step selection changed"
        );
    }

    /// Check every required input, collecting all failures.
    ///
    /// The outcome is also written to the step's summary text: the joined
    /// errors on failure, the selection summary on success.
    pub fn validate(&mut self) -> ValidationReport {
        self.summary_text.clear();
        let mut errors = Vec::new();

        let workspace_id = self.workspace_selector.selected_id();
        debug!(step_number = self.step_number, workspace_id = ?workspace_id, "Validating workspace");
        if workspace_id.is_none() {
            errors.push(WORKSPACE_NOT_SELECTED.to_string());
        }

        let classes = self.class_selector.selected_classes();
        debug!(step_number = self.step_number, classes = %class_names_to_str(&classes), "Validating classes");
        if classes.is_empty() {
            errors.push(NO_CLASSES_SELECTED.to_string());
        }

        let reviewers = self.reviewer_selector.current_selection();
        debug!(step_number = self.step_number, reviewers = %user_logins_to_str(&reviewers), "Validating reviewers");
        if reviewers.is_empty() {
            errors.push(NO_REVIEWERS_SELECTED.to_string());
        }

        let labelers = self.labeler_selector.current_selection();
        debug!(step_number = self.step_number, labelers = %user_logins_to_str(&labelers), "Validating labelers");
        if labelers.is_empty() {
            errors.push(NO_LABELERS_SELECTED.to_string());
        }

        let summary = errors.is_empty().then(|| {
            format!(
                "Selected classes: {} | Assigned reviewers: {} | Assigned labelers: {}",
                class_names_to_str(&classes),
                user_logins_to_str(&reviewers),
                user_logins_to_str(&labelers),
            )
        });

        let report = ValidationReport { errors, summary };
        self.summary_text = report.display_text();
        self.summary_status = report.status();
        report
    }

    pub fn to_record(&self) -> StepRecord {
        StepRecord {
            step_number: self.step_number,
            team_id: self.team_id,
            workspace_id: self.workspace_id,
            project_id: self.project_id,
            dataset_id: self.dataset_id,
            selected_classes: self.class_selector.selected_classes(),
            reviewer_ids: user_ids(&self.reviewer_selector.current_selection()),
            labeler_ids: user_ids(&self.labeler_selector.current_selection()),
        }
    }

    /// Restore selections from a stored record without validating or
    /// touching the active gate.
    pub fn update_from_record(&mut self, record: &StepRecord) {
        if record.step_number != self.step_number {
            warn!(
                step_number = self.step_number,
                stored_step_number = record.step_number,
                "Stored record carries a different step number; keeping ours"
            );
        }

        self.team_id = record.team_id;
        self.workspace_id = record.workspace_id;
        self.project_id = record.project_id;
        self.dataset_id = record.dataset_id;
        info!(
            step_number = self.step_number,
            team_id = ?self.team_id,
            workspace_id = ?self.workspace_id,
            project_id = ?self.project_id,
            dataset_id = ?self.dataset_id,
            "Updating workflow step from stored record"
        );

        self.workspace_selector.set_ids(self.team_id, self.workspace_id);

        self.class_selector.register(record.selected_classes.clone());
        self.class_selector.resolve_by_name(&record.class_names());

        self.reviewer_selector.scope_to_team(self.team_id);
        self.labeler_selector.scope_to_team(self.team_id);
        self.reviewer_selector
            .select_by_ids(self.team_id, &record.reviewer_ids);
        self.labeler_selector
            .select_by_ids(self.team_id, &record.labeler_ids);
    }

    pub fn layout(&self) -> Widget {
        Widget::column(vec![
            Widget::SelectWorkspace {
                selected: self.workspace_selector.selected_id(),
            },
            Widget::SelectClass {
                multiple: true,
                selected: class_names(&self.class_selector.selected_classes()),
            },
            Widget::SelectUser {
                roles: REVIEWER_ROLES.to_vec(),
                multiple: true,
                team_id: self.reviewer_selector.team_id(),
                selected: user_ids(&self.reviewer_selector.current_selection()),
            },
            Widget::SelectUser {
                roles: LABELER_ROLES.to_vec(),
                multiple: true,
                team_id: self.labeler_selector.team_id(),
                selected: user_ids(&self.labeler_selector.current_selection()),
            },
            Widget::Text {
                text: self.summary_text.clone(),
                status: self.summary_status,
            },
            Widget::button(CONFIRM_LABEL, self.confirm_enabled()),
        ])
    }
}

fn class_names(classes: &[ClassDescriptor]) -> Vec<String> {
    classes.iter().map(|c| c.name.clone()).collect()
}

fn user_ids(users: &[UserDescriptor]) -> Vec<UserId> {
    users.iter().map(|u| u.id).collect()
}

pub fn class_names_to_str(classes: &[ClassDescriptor]) -> String {
    class_names(classes).join(", ")
}

pub fn user_logins_to_str(users: &[UserDescriptor]) -> String {
    users
        .iter()
        .map(|u| u.login.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
