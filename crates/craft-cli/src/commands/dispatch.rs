use std::process::ExitCode;

use craft_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, pipeline, flags).await,
        Commands::Asset { action } => commands::asset::handle(&action, pipeline, flags).await,
        Commands::Dou { action } => commands::dou::handle(&action, pipeline, flags).await,
        Commands::Rtm { action } => commands::generate::rtm(&action, pipeline, flags).await,
        Commands::Scenarios { action } => {
            commands::generate::scenarios(&action, pipeline, flags).await
        }
        Commands::Cases { action } => commands::generate::test_cases(&action, pipeline, flags).await,
        Commands::AutomatedTest { action } => {
            commands::generate::automated_test(&action, pipeline, flags).await
        }
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
