use anyhow::{bail, Result};
use std::path::Path;

use super::Command;
use crate::config::{LabelingWorkflowConfig, CONFIG_FILE_STEM};

pub struct InitConfigCommand {
    pub force: bool,
}

impl InitConfigCommand {
    pub fn new() -> Self {
        Self { force: false }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl Default for InitConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for InitConfigCommand {
    fn execute(&self) -> Result<()> {
        let path = format!("{CONFIG_FILE_STEM}.toml");
        if Path::new(&path).exists() && !self.force {
            bail!("{path} already exists; use --force to overwrite it");
        }
        LabelingWorkflowConfig::default().save_to_file(&path)?;
        println!("⚙️  Wrote {path}");
        Ok(())
    }
}
