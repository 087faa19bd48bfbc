use clap::Subcommand;

/// Commands shared by every stage that regenerates a parent's children.
#[derive(Clone, Debug, Subcommand)]
pub enum GenerateCommands {
    /// Regenerate the children of a parent, replacing any previous set.
    Generate { parent_id: String },
}
