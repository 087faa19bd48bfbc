use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{BackendArg, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `autocraft` binary.
#[derive(Debug, Parser)]
#[command(
    name = "autocraft",
    version,
    about = "autocraft - turn raw requirements into traceable QA artifacts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path, overriding `storage.db_path`
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Generator backend, overriding `generator.backend`
    #[arg(long, global = true)]
    pub backend: Option<BackendArg>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            backend: self.backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AssetCommands, DouCommands, GenerateCommands, ProjectCommands};
    use super::{BackendArg, Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "autocraft",
            "--format",
            "raw",
            "--db",
            "/tmp/a.db",
            "--verbose",
            "project",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.db.as_deref(), Some("/tmp/a.db"));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "autocraft",
            "rtm",
            "generate",
            "prj-1",
            "--backend",
            "fixture",
            "--quiet",
        ])
        .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.backend, Some(BackendArg::Fixture));
        match cli.command {
            Commands::Rtm {
                action: GenerateCommands::Generate { parent_id },
            } => assert_eq!(parent_id, "prj-1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["autocraft", "--format", "xml", "project", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn approve_defaults_to_approved() {
        let cli = Cli::try_parse_from(["autocraft", "dou", "approve", "prj-1"])
            .expect("cli should parse");
        match cli.command {
            Commands::Dou {
                action: DouCommands::Approve { project_id, status },
            } => {
                assert_eq!(project_id, "prj-1");
                assert_eq!(status, "APPROVED");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ingest_needs_content_or_file() {
        assert!(
            Cli::try_parse_from(["autocraft", "asset", "ingest", "prj-1", "--type", "NOTE"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "autocraft", "asset", "ingest", "prj-1", "--type", "NOTE", "--content", "abc",
                "--file", "x.txt",
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from([
            "autocraft",
            "asset",
            "ingest",
            "prj-1",
            "--type",
            "TRANSCRIPT",
            "--file",
            "meeting.txt",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Asset {
                action: AssetCommands::Ingest(args),
            } => {
                assert_eq!(args.asset_type, "TRANSCRIPT");
                assert_eq!(args.file.as_deref(), Some("meeting.txt"));
                assert_eq!(args.content, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn schema_name_is_optional() {
        let cli = Cli::try_parse_from(["autocraft", "schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(ref args) if args.name.is_none()));
    }
}
