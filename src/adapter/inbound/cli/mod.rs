//! Command-line front end.
//!
//! Parses arguments, layers CLI overrides over the configuration file, and
//! dispatches to the command handlers.

pub mod check;
pub mod command;
pub mod generate;
pub mod output;
pub mod repl;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{CheckCommand, Cli, Commands, SessionArgs};

/// Run the parsed command.
///
/// # Errors
///
/// Returns the first error raised by configuration loading, the engine, or
/// I/O.
pub async fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Generate(args) => generate::execute(cli, args),
        Commands::Repl(args) => repl::execute(cli, args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config),
        Commands::Check(CheckCommand::Model(args)) => check::execute_model(cli, args),
    }
}

/// Load configuration for a session command.
///
/// Precedence for the model path is `--model`, then `ORACLE_MODEL_PATH`,
/// then the file. `--log-level` takes precedence over `RUST_LOG`. When `--model` is given the configuration file may be
/// absent.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the merged configuration
/// is invalid.
pub fn load_config(cli: &Cli, args: &SessionArgs) -> Result<Config> {
    let mut config = if args.model.is_some() && !args.config.exists() {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    } else {
        Config::read(&args.config)?
    };

    if let Some(model) = &args.model {
        config.model.path = model.to_string_lossy().into_owned();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        config.logging.ignore_env = true;
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.validate()?;
    Ok(config)
}
