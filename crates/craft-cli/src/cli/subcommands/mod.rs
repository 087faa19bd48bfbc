mod asset;
mod dou;
mod generate;
mod project;

pub use asset::{AssetCommands, IngestArgs};
pub use dou::DouCommands;
pub use generate::GenerateCommands;
pub use project::ProjectCommands;
