use std::process::ExitCode;

use craft_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::output::emit;

/// Handle `autocraft project`.
pub async fn handle(
    action: &ProjectCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match action {
        ProjectCommands::Create { name } => emit(pipeline.create_project(name).await, flags.format),
        ProjectCommands::List => emit(pipeline.list_projects().await, flags.format),
        ProjectCommands::Get { id } => emit(pipeline.get_project(id).await, flags.format),
        ProjectCommands::Delete { id } => {
            emit(pipeline.soft_delete_project(id).await, flags.format)
        }
    }
}
