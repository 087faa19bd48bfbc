use clap::{Args, Subcommand};

/// Raw asset commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssetCommands {
    /// Attach requirement text to a project.
    Ingest(IngestArgs),
}

#[derive(Clone, Debug, Args)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["content", "file"]))]
pub struct IngestArgs {
    pub project_id: String,
    /// Free-form asset type label, e.g. TRANSCRIPT or DOCUMENT.
    #[arg(long = "type")]
    pub asset_type: String,
    /// Asset text.
    #[arg(long)]
    pub content: Option<String>,
    /// Read asset text from a file.
    #[arg(long)]
    pub file: Option<String>,
}
