// Core types for the multi-team labeling workflow

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type TeamId = u64;
pub type WorkspaceId = u64;
pub type ProjectId = u64;
pub type DatasetId = u64;
pub type UserId = u64;

pub const WORKSPACE_NOT_SELECTED: &str = "Workspace is not selected";
pub const NO_CLASSES_SELECTED: &str = "At least one class must be selected";
pub const NO_REVIEWERS_SELECTED: &str = "At least one reviewer must be selected";
pub const NO_LABELERS_SELECTED: &str = "At least one labeler must be selected";

/// Annotation class as stored by the labeling platform.
///
/// Only the name participates in selection; every other schema field is
/// carried through untouched so a stored class keeps its full definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    #[serde(rename = "title")]
    pub name: String,
    pub shape: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, shape: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            color: None,
            extra: Map::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Team role of a platform user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Annotator,
    Reviewer,
    Manager,
}

/// Roles allowed in a reviewer picker
pub const REVIEWER_ROLES: &[UserRole] = &[UserRole::Annotator, UserRole::Reviewer, UserRole::Manager];

/// Roles allowed in a labeler picker
pub const LABELER_ROLES: &[UserRole] = &[UserRole::Annotator, UserRole::Reviewer];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDescriptor {
    pub id: UserId,
    pub login: String,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<TeamId>,
}

impl UserDescriptor {
    pub fn is_member_of(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

/// Persisted snapshot of one step.
///
/// Field names are part of the stored format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero when absent from the stored record; the storage key decides
    #[serde(default)]
    pub step_number: u32,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub dataset_id: Option<DatasetId>,
    #[serde(default)]
    pub selected_classes: Vec<ClassDescriptor>,
    #[serde(default)]
    pub reviewer_ids: Vec<UserId>,
    #[serde(default)]
    pub labeler_ids: Vec<UserId>,
}

impl StepRecord {
    pub fn class_names(&self) -> Vec<String> {
        self.selected_classes.iter().map(|c| c.name.clone()).collect()
    }
}

/// Status shown next to a step's summary text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStatus {
    #[default]
    Text,
    Success,
    Error,
}

/// Result of validating one step: either errors or a summary, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub summary: Option<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The single line shown to the operator
    pub fn display_text(&self) -> String {
        if self.errors.is_empty() {
            self.summary.clone().unwrap_or_default()
        } else {
            format!("{}.", self.errors.join(". "))
        }
    }

    pub fn status(&self) -> TextStatus {
        if self.is_valid() {
            TextStatus::Success
        } else {
            TextStatus::Error
        }
    }
}

/// Selection changes delivered to a step by the widget host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    WorkspaceSelected(Option<WorkspaceId>),
    ClassesSelected(Vec<String>),
    ReviewersSelected(Vec<UserId>),
    LabelersSelected(Vec<UserId>),
}

/// What happened when the operator pressed "Confirm Selection"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Step validated and the cursor moved forward
    Advanced { to: u32 },
    /// Validation failed; cursor unchanged
    Rejected(ValidationReport),
    /// The step's confirm input is disabled
    NotActive,
    /// Step validated but there is no step to move to
    OutOfRange { requested: u32 },
    /// Step validated but the cursor is already past it
    AlreadyReached { cursor: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { steps: usize },
    MissingSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { steps: Vec<u32> },
    NotFound,
    MissingSelection,
}
