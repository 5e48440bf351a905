use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "labeling-workflow")]
#[command(about = "Configure multi-team review and labeling assignments per dataset")]
#[command(long_about = "Each team gets a workspace, label classes, reviewers and labelers. Teams are \
                       configured one after another and the finished workflow is stored in the \
                       project's custom data, keyed by dataset.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a team plan file step by step and save the workflow
    Plan {
        /// JSON plan with one entry per team
        #[arg(help = "Path to a JSON plan: {\"teams\": [{workspace_id, classes, reviewers, labelers}]}")]
        file: PathBuf,
        /// Project to store the workflow in
        #[arg(long, help = "Project id (defaults to PROJECT_ID)")]
        project: Option<u64>,
        /// Dataset the workflow belongs to
        #[arg(long, help = "Dataset id (defaults to DATASET_ID)")]
        dataset: Option<u64>,
        /// Validate and report without writing anything
        #[arg(long, help = "Run every step but keep the result in memory")]
        dry_run: bool,
    },
    /// Print the stored workflow of a dataset
    Show {
        #[arg(long, help = "Project id (defaults to PROJECT_ID)")]
        project: Option<u64>,
        #[arg(long, help = "Dataset id (defaults to DATASET_ID)")]
        dataset: Option<u64>,
    },
    /// Print the widget tree for a dataset as JSON
    Layout {
        #[arg(long, help = "Project id (defaults to PROJECT_ID)")]
        project: Option<u64>,
        #[arg(long, help = "Dataset id (defaults to DATASET_ID)")]
        dataset: Option<u64>,
    },
    /// Write the default configuration file
    InitConfig {
        #[arg(long, help = "Overwrite an existing labeling-workflow.toml")]
        force: bool,
    },
}
