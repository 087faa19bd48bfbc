use clap::{Args, Subcommand};

use crate::cli::subcommands::{AssetCommands, DouCommands, GenerateCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Raw assets.
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Document of Understanding.
    Dou {
        #[command(subcommand)]
        action: DouCommands,
    },
    /// Requirements traceability matrix (parent: project ID).
    Rtm {
        #[command(subcommand)]
        action: GenerateCommands,
    },
    /// Test scenarios (parent: RTM item ID).
    Scenarios {
        #[command(subcommand)]
        action: GenerateCommands,
    },
    /// Test cases (parent: scenario ID).
    Cases {
        #[command(subcommand)]
        action: GenerateCommands,
    },
    /// Automated test (parent: test case ID).
    AutomatedTest {
        #[command(subcommand)]
        action: GenerateCommands,
    },
    /// Print JSON Schemas for entities and generator outputs.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; lists every name when omitted.
    pub name: Option<String>,
}
