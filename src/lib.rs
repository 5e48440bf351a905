// Team Labeling Workflow Library - Multi-team review/labeling assignment
// This exposes the core components for testing and integration

pub mod catalog;
pub mod cli;
pub mod config;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use catalog::{CatalogError, CatalogSnapshot};
pub use config::{config, LabelingWorkflowConfig};
pub use store::{
    FileMetadataStore, InMemoryMetadataStore, MetadataStore, PersistenceError, WorkflowConfigStore,
    WORKFLOW_TITLE,
};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    ConfirmOutcome, LoadOutcome, SaveOutcome, StepEvent, StepRecord, Workflow, WorkflowError,
    WorkflowStep,
};
