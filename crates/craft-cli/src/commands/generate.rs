//! Stage regeneration commands. Each replaces the whole child set of the
//! given parent.

use std::process::ExitCode;

use craft_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GenerateCommands;
use crate::output::emit;

fn parent(action: &GenerateCommands) -> &str {
    match action {
        GenerateCommands::Generate { parent_id } => parent_id,
    }
}

pub async fn rtm(
    action: &GenerateCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    emit(pipeline.generate_rtm(parent(action)).await, flags.format)
}

pub async fn scenarios(
    action: &GenerateCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    emit(pipeline.generate_scenarios(parent(action)).await, flags.format)
}

pub async fn test_cases(
    action: &GenerateCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    emit(pipeline.generate_test_cases(parent(action)).await, flags.format)
}

pub async fn automated_test(
    action: &GenerateCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    emit(
        pipeline.generate_automated_test(parent(action)).await,
        flags.format,
    )
}
