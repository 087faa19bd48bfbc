use std::process::ExitCode;

use anyhow::Context;

use craft_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `autocraft schema`. Needs neither configuration nor a store.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let registry = SchemaRegistry::new();
    match &args.name {
        None => output(&registry.list(), flags.format)?,
        Some(name) => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown schema '{name}'"))?;
            output(schema, flags.format)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
