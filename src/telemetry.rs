use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;
use crate::workflow::types::{DatasetId, ProjectId};

/// Initialize structured logging.
///
/// `RUST_LOG` wins over the configured level when set. Logs go to stderr;
/// stdout is reserved for command output.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    if config.json_logs {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .with(filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()?;
    }

    tracing::debug!(log_level = %config.log_level, json = config.json_logs, "Telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one operation
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one save or load of a dataset's configuration
pub fn create_workflow_span(
    operation: &str,
    project_id: ProjectId,
    dataset_id: DatasetId,
    correlation_id: &str,
) -> tracing::Span {
    tracing::info_span!(
        "workflow_persistence",
        operation = operation,
        project.id = project_id,
        dataset.id = dataset_id,
        correlation.id = correlation_id,
    )
}
