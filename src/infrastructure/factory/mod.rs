//! Engine factory wiring.
//!
//! Chooses the engine backend compiled into this build and opens a session
//! on the configured model. One-shot callers express their work as a
//! [`SessionTask`] so they stay generic over the engine type; long-running
//! callers get a [`SessionWorker`] behind the `Llm` port.

use tracing::info;

use crate::application::session::InferenceSession;
use crate::application::worker::SessionWorker;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::engine::Engine;

/// Work to run against a freshly created session.
pub trait SessionTask {
    type Output;

    /// Run against `session`. The session is released afterwards.
    fn run<E: Engine>(self, session: &mut InferenceSession<E>) -> Result<Self::Output>;
}

#[cfg(feature = "llamacpp")]
mod llamacpp {
    use crate::adapter::outbound::llamacpp::{LlamaCppFactory, LlamaHost};
    use crate::error::{InitializationError, Result};
    use crate::infrastructure::config::settings::Config;

    pub(super) fn backend(config: &Config) -> Result<(LlamaHost, LlamaCppFactory)> {
        let host = LlamaHost::init().map_err(|source| InitializationError {
            engine: "llamacpp",
            path: config.model_path(),
            source,
        })?;
        Ok((host, LlamaCppFactory::new(&config.llamacpp)))
    }
}

/// Open a session on the configured model, run `task`, release the session.
///
/// # Errors
///
/// Returns an error if no engine backend is compiled in, the engine rejects
/// the model, or the task fails.
#[cfg(feature = "llamacpp")]
pub fn run_session<T: SessionTask>(config: &Config, task: T) -> Result<T::Output> {
    let (host, factory) = llamacpp::backend(config)?;
    let model_path = config.model_path();

    info!(engine = "llamacpp", model = %model_path.display(), "Opening session");
    InferenceSession::scoped(&factory, &host, model_path, |session| task.run(session))?
}

/// Open a session on the configured model and move it onto a worker thread
/// with a queue of `worker.queue_capacity` prompts.
///
/// # Errors
///
/// Returns an error if no engine backend is compiled in, the engine rejects
/// the model, or the worker thread cannot be spawned.
#[cfg(feature = "llamacpp")]
pub fn spawn_worker(config: &Config) -> Result<SessionWorker> {
    let (host, factory) = llamacpp::backend(config)?;
    let model_path = config.model_path();

    info!(engine = "llamacpp", model = %model_path.display(), "Opening session");
    let session = InferenceSession::create(&factory, &host, model_path)?;
    SessionWorker::spawn(session, config.worker.queue_capacity)
}

/// Open a session on the configured model, run `task`, release the session.
///
/// # Errors
///
/// Always fails: this build has no engine backend.
#[cfg(not(feature = "llamacpp"))]
pub fn run_session<T: SessionTask>(config: &Config, _task: T) -> Result<T::Output> {
    Err(no_backend(config))
}

/// Open a session on the configured model and move it onto a worker thread.
///
/// # Errors
///
/// Always fails: this build has no engine backend.
#[cfg(not(feature = "llamacpp"))]
pub fn spawn_worker(config: &Config) -> Result<SessionWorker> {
    Err(no_backend(config))
}

#[cfg(not(feature = "llamacpp"))]
fn no_backend(config: &Config) -> crate::error::Error {
    use crate::error::ConfigError;

    info!(model = %config.model_path().display(), "No engine backend compiled in");
    ConfigError::Other(
        "no inference engine compiled in; rebuild with `--features llamacpp`".to_string(),
    )
    .into()
}
