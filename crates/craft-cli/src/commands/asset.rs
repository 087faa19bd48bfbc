use std::process::ExitCode;

use anyhow::Context;

use craft_pipeline::Pipeline;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AssetCommands, IngestArgs};
use crate::output::emit;

/// Handle `autocraft asset`.
pub async fn handle(
    action: &AssetCommands,
    pipeline: &Pipeline,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match action {
        AssetCommands::Ingest(args) => {
            let content = read_content(args)?;
            emit(
                pipeline
                    .ingest_asset(&args.project_id, &args.asset_type, &content)
                    .await,
                flags.format,
            )
        }
    }
}

fn read_content(args: &IngestArgs) -> anyhow::Result<String> {
    match (&args.content, &args.file) {
        (Some(content), _) => Ok(content.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read asset file {path}")),
        (None, None) => anyhow::bail!("either --content or --file is required"),
    }
}
