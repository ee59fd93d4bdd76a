//! Handlers for the `check` commands.

use std::path::Path;

use super::command::{Cli, SessionArgs};
use super::{load_config, output};
use crate::application::session::InferenceSession;
use crate::domain::SessionState;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::{run_session, SessionTask};
use crate::port::outbound::engine::Engine;

/// Name of the engine backend compiled into this build.
#[must_use]
pub fn compiled_engine() -> &'static str {
    if cfg!(feature = "llamacpp") {
        "llamacpp"
    } else {
        "none"
    }
}

/// Validate configuration file without loading the model.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Model", config.model_path().display());
    output::field("Engine", compiled_engine());
    output::field("Context", config.llamacpp.context_size);
    output::field("Max tokens", config.llamacpp.max_tokens);
    output::field("GPU layers", config.llamacpp.gpu_layers);
    output::field("Queue", config.worker.queue_capacity);
    output::field("Log level", &config.logging.level);

    if !config.model_path().is_file() {
        output::warning("Model file not found at the configured path");
    }
    if compiled_engine() == "none" {
        output::warning("No engine backend compiled in (rebuild with --features llamacpp)");
    }

    output::success("Configuration check complete");
    Ok(())
}

/// What a model probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProbe {
    pub engine: &'static str,
    pub state: SessionState,
}

struct Probe;

impl SessionTask for Probe {
    type Output = ModelProbe;

    fn run<E: Engine>(self, session: &mut InferenceSession<E>) -> Result<ModelProbe> {
        Ok(ModelProbe {
            engine: session.engine_name(),
            state: session.state(),
        })
    }
}

/// Load the configured model, then release it.
pub fn execute_model(cli: &Cli, args: &SessionArgs) -> Result<()> {
    let config = load_config(cli, args)?;
    config.init_logging();

    output::section("Model Check");
    output::field("Model", config.model_path().display());

    let probe = run_session(&config, Probe)?;

    output::field("Engine", probe.engine);
    output::field("State", probe.state);
    output::success("Model loaded");
    output::success("Session released");
    Ok(())
}
