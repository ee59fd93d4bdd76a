use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use oracle::adapter::inbound::cli::command::Cli;
use oracle::adapter::inbound::cli::output::{self, Mode};

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(Mode::from_flags(cli.json, cli.quiet));

    match oracle::adapter::inbound::cli::execute(&cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if output::is_json() => {
            output::error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}
