//! Command-line interface definitions.
//!
//! Defines the CLI structure for the oracle binary using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration file name.
pub const DEFAULT_CONFIG: &str = "oracle.toml";

/// Run prompts against an on-device language model
#[derive(Parser, Debug)]
#[command(name = "oracle")]
#[command(version, about)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override log level (trace, debug, info, warn, error); wins over RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a response to one prompt
    Generate(GenerateArgs),

    /// Answer prompts read line by line from stdin
    Repl(SessionArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `oracle check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Load the model and release it again
    Model(SessionArgs),
}

/// Shared argument for commands that only need a config path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for commands that open a session.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Model file, overriding the configuration
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Prompt text; read from stdin when omitted
    #[arg(short, long)]
    pub prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "oracle");
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["oracle", "generate", "--prompt", "hello"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.prompt.as_deref(), Some("hello"));
        assert_eq!(args.session.config, PathBuf::from(DEFAULT_CONFIG));
        assert!(args.session.model.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_generate_with_model_override() {
        let cli = Cli::try_parse_from([
            "oracle",
            "generate",
            "-m",
            "/tmp/model.gguf",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.session.model, Some(PathBuf::from("/tmp/model.gguf")));
        assert_eq!(args.session.config, PathBuf::from("custom.toml"));
        assert!(args.prompt.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "oracle",
            "repl",
            "--json",
            "-q",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Repl(_)));
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.json_logs);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_check_subcommands() {
        let cli = Cli::try_parse_from(["oracle", "check", "config"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check(CheckCommand::Config(_))
        ));

        let cli = Cli::try_parse_from(["oracle", "check", "model", "-m", "m.gguf"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Model(_))));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["oracle", "serve"]).is_err());
    }
}
