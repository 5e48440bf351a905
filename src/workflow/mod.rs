// Multi-team labeling workflow
//
// Each team gets one step (workspace, classes, reviewers, labelers). Steps
// unlock one after another as they validate, and the whole configuration is
// stored per dataset in the project's custom data.

pub mod coordinator;
pub mod cursor;
pub mod layout;
pub mod step;
pub mod traits;
pub mod types;

pub use coordinator::{Workflow, WorkflowError};
pub use layout::Widget;
pub use step::WorkflowStep;
pub use traits::{ClassCatalog, SelectionProvider, StepSelectors, UserCatalog};
pub use types::{
    ClassDescriptor, ConfirmOutcome, LoadOutcome, SaveOutcome, StepEvent, StepRecord, UserDescriptor,
    UserRole, ValidationReport,
};
