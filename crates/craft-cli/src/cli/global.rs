use clap::ValueEnum;

use craft_config::GeneratorBackend;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed envelope.
    Json,
    /// Single-line envelope.
    Raw,
}

/// Generator backend selectable from the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BackendArg {
    Fixture,
    Openai,
}

impl From<BackendArg> for GeneratorBackend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Fixture => Self::Fixture,
            BackendArg::Openai => Self::OpenAi,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub db: Option<String>,
    pub backend: Option<BackendArg>,
}
