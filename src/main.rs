use anyhow::Result;
use clap::Parser;

use talent_map::cli::commands::{
    attach::AttachCommand, board::BoardCommand, init::InitCommand, interviews::InterviewsCommand,
    processes::ProcessesCommand, show_how_to_get_started, transition::TransitionCommand, Command,
};
use talent_map::cli::{Cli, Commands};
use talent_map::pipeline::StageTransition;
use talent_map::{init_config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = init_config(cli.config.as_deref())?;
    if let Err(e) = init_telemetry(&settings.observability) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    tokio::runtime::Runtime::new()?.block_on(async {
        match cli.command {
            // Default behavior: no subcommand - explain how to get started
            None => show_how_to_get_started().await,
            Some(Commands::Board { process, stage }) => {
                BoardCommand::new(process, stage).execute().await
            }
            Some(Commands::Processes) => ProcessesCommand.execute().await,
            Some(Commands::Advance { file_id }) => {
                TransitionCommand::new(file_id, StageTransition::Advance)
                    .execute()
                    .await
            }
            Some(Commands::Reject { file_id }) => {
                TransitionCommand::new(file_id, StageTransition::Reject)
                    .execute()
                    .await
            }
            Some(Commands::Restore { file_id }) => {
                TransitionCommand::new(file_id, StageTransition::Restore)
                    .execute()
                    .await
            }
            Some(Commands::Attach {
                file_id,
                report,
                stage,
            }) => AttachCommand::new(file_id, report, stage).execute().await,
            Some(Commands::Interviews { file_id }) => {
                InterviewsCommand { file_id }.execute().await
            }
            Some(Commands::Init { force, dry_run }) => {
                InitCommand::new(force, dry_run).execute().await
            }
        }
    })
}
