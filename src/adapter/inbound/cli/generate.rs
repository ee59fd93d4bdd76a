//! Handler for the `generate` command.

use std::io::{self, Read};

use tracing::debug;

use super::command::{Cli, GenerateArgs};
use super::{load_config, output};
use crate::application::session::InferenceSession;
use crate::error::Result;
use crate::infrastructure::factory::{run_session, SessionTask};
use crate::port::outbound::engine::Engine;

/// One prompt through one session.
pub struct Generate {
    pub prompt: String,
}

impl SessionTask for Generate {
    type Output = String;

    fn run<E: Engine>(self, session: &mut InferenceSession<E>) -> Result<String> {
        Ok(session.generate(&self.prompt)?)
    }
}

/// Execute the generate command.
pub fn execute(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let config = load_config(cli, &args.session)?;
    config.init_logging();

    let prompt = match &args.prompt {
        Some(prompt) => prompt.clone(),
        None => read_prompt(io::stdin().lock())?,
    };
    debug!(prompt_len = prompt.len(), "Prompt read");

    let response = run_session(&config, Generate { prompt })?;
    output::response(&response);
    Ok(())
}

/// Read the whole prompt from `reader`.
///
/// Drops the single line terminator a shell pipe appends; everything else
/// is kept as typed.
fn read_prompt(mut reader: impl Read) -> Result<String> {
    let mut prompt = String::new();
    reader.read_to_string(&mut prompt)?;

    if prompt.ends_with('\n') {
        prompt.pop();
        if prompt.ends_with('\r') {
            prompt.pop();
        }
    }
    Ok(prompt)
}
