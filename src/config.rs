use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::workflow::types::{DatasetId, ProjectId, TeamId, WorkspaceId};

pub const CONFIG_FILE_STEM: &str = "labeling-workflow";

/// Main configuration structure for the labeling workflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelingWorkflowConfig {
    /// Workflow shape
    pub workflow: WorkflowConfig,
    /// Ids the app was launched with
    pub context: LaunchContext,
    /// Where project metadata is kept
    pub store: StoreConfig,
    /// Workspace/class/user catalog export
    pub catalog: CatalogConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Number of teams, one workflow step each
    pub number_of_teams: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LaunchContext {
    pub team_id: Option<TeamId>,
    pub workspace_id: Option<WorkspaceId>,
    pub project_id: Option<ProjectId>,
    pub dataset_id: Option<DatasetId>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding one JSON document per project
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the catalog snapshot JSON
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level or filter directive
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
}

impl Default for LabelingWorkflowConfig {
    fn default() -> Self {
        Self {
            workflow: WorkflowConfig { number_of_teams: 2 },
            context: LaunchContext::default(),
            store: StoreConfig {
                directory: ".labeling-workflow/projects".to_string(),
            },
            catalog: CatalogConfig {
                path: ".labeling-workflow/catalog.json".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl LabelingWorkflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (labeling-workflow.toml)
    /// 3. Environment variables (prefixed with LABELING_WORKFLOW__)
    /// 4. Platform launch variables (TEAM_ID, WORKSPACE_ID, PROJECT_ID, DATASET_ID)
    ///    for any context id still unset
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new(&format!("{CONFIG_FILE_STEM}.toml")).exists() {
            builder = builder.add_source(File::with_name(CONFIG_FILE_STEM));
        }

        builder = builder.add_source(
            Environment::with_prefix("LABELING_WORKFLOW")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut workflow_config: LabelingWorkflowConfig = builder.build()?.try_deserialize()?;
        workflow_config.apply_launch_env();
        Ok(workflow_config)
    }

    fn apply_launch_env(&mut self) {
        let context = &mut self.context;
        context.team_id = context.team_id.or_else(|| env_id("TEAM_ID"));
        context.workspace_id = context.workspace_id.or_else(|| env_id("WORKSPACE_ID"));
        context.project_id = context.project_id.or_else(|| env_id("PROJECT_ID"));
        context.dataset_id = context.dataset_id.or_else(|| env_id("DATASET_ID"));
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env and local.env files if they exist
    pub fn load_env_file() -> Result<()> {
        for file in [".env", "local.env"] {
            if Path::new(file).exists() {
                dotenvy::from_filename(file)?;
                tracing::debug!(file, "Loaded environment variables");
            }
        }
        Ok(())
    }
}

fn env_id(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(variable = name, value = %value, "Ignoring non-numeric id");
            None
        }
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<LabelingWorkflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = LabelingWorkflowConfig::load_env_file();
        LabelingWorkflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static LabelingWorkflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_usable() {
        let config = LabelingWorkflowConfig::default();
        assert_eq!(config.workflow.number_of_teams, 2);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.context.project_id.is_none());
    }

    #[test]
    fn test_saved_file_parses_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("labeling-workflow.toml");
        let mut config = LabelingWorkflowConfig::default();
        config.workflow.number_of_teams = 4;
        config.context.project_id = Some(7);

        config.save_to_file(&path).unwrap();
        let parsed: LabelingWorkflowConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(parsed.workflow.number_of_teams, 4);
        assert_eq!(parsed.context.project_id, Some(7));
        assert_eq!(parsed.store.directory, config.store.directory);
    }
}
