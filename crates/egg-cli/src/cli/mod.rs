use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `egg` binary.
#[derive(Debug, Parser)]
#[command(name = "egg", version, about = "objeggtives - chat comments as tracked list items")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max items to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file layered over the user and project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::root_commands::{ListName, SchemaType};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["egg", "--format", "table", "--verbose", "run"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Run));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["egg", "info", "shopping", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Info(ref args) if args.list == ListName::Shopping));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["egg", "--format", "xml", "run"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_list_is_rejected() {
        assert!(Cli::try_parse_from(["egg", "init", "groceries"]).is_err());
    }

    #[test]
    fn list_accepts_all_and_limit() {
        let cli = Cli::try_parse_from(["egg", "list", "objeggtives", "--all", "--limit", "5"])
            .expect("cli should parse");
        assert_eq!(cli.limit, Some(5));
        assert!(matches!(
            cli.command,
            Commands::List(ref args) if args.all && args.list == ListName::Objeggtives
        ));
    }

    #[test]
    fn schema_type_is_optional() {
        let cli = Cli::try_parse_from(["egg", "schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(ref args) if args.type_name.is_none()));

        let cli = Cli::try_parse_from(["egg", "schema", "--type", "message-event"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.type_name == Some(SchemaType::MessageEvent)
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["egg", "--config", "/tmp/egg.toml", "-q", "run"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some(Path::new("/tmp/egg.toml")));
        assert_eq!(flags.forced_log_level(), Some("error"));
    }
}
