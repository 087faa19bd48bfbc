use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create { name: String },
    /// List live projects, newest first.
    List,
    /// Show a project with its full artifact tree.
    Get { id: String },
    /// Soft-delete a project.
    Delete { id: String },
}
