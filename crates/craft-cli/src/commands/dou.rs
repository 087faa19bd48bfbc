use std::process::ExitCode;

use craft_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DouCommands;
use crate::output::emit;

/// Handle `autocraft dou`.
pub async fn handle(
    action: &DouCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match action {
        DouCommands::Generate { project_id } => {
            emit(pipeline.generate_dou(project_id).await, flags.format)
        }
        DouCommands::Approve { project_id, status } => {
            emit(pipeline.approve_dou(project_id, status).await, flags.format)
        }
    }
}
