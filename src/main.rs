use anyhow::Result;
use clap::Parser;

use team_labeling_workflow::cli::commands::init_config::InitConfigCommand;
use team_labeling_workflow::cli::commands::layout::LayoutCommand;
use team_labeling_workflow::cli::commands::plan::PlanCommand;
use team_labeling_workflow::cli::commands::show::ShowCommand;
use team_labeling_workflow::cli::commands::Command;
use team_labeling_workflow::cli::{Cli, Commands};
use team_labeling_workflow::{config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { force } = cli.command {
        return InitConfigCommand::new().with_force(force).execute();
    }

    let config = config()?.clone();
    init_telemetry(&config.observability)?;

    match cli.command {
        Commands::Plan {
            file,
            project,
            dataset,
            dry_run,
        } => PlanCommand::new(file, config)
            .with_target(project, dataset)
            .with_dry_run(dry_run)
            .execute(),
        Commands::Show { project, dataset } => {
            ShowCommand::new(config).with_target(project, dataset).execute()
        }
        Commands::Layout { project, dataset } => {
            LayoutCommand::new(config).with_target(project, dataset).execute()
        }
        Commands::InitConfig { .. } => Ok(()),
    }
}
