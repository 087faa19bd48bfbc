use clap::Subcommand;

/// Document of Understanding commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DouCommands {
    /// Generate (or regenerate) the project's DOU as a draft.
    Generate { project_id: String },
    /// Approve the project's DOU.
    Approve {
        project_id: String,
        #[arg(long, default_value = "APPROVED")]
        status: String,
    },
}
