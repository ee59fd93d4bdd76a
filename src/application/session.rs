//! Inference session: one model artifact bound to one generation interface.
//!
//! A session owns its engine handle exclusively. The handle is acquired in
//! [`InferenceSession::create`] and released exactly once, either through
//! [`InferenceSession::release`] or when the session is dropped.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{EngineOptions, SessionState};
use crate::error::{InferenceError, InitializationError};
use crate::port::outbound::engine::{Engine, EngineFactory};

/// A loaded model ready to answer prompts.
///
/// Prompts and responses pass through unchanged. The session keeps no
/// history and does not cache responses; every [`generate`](Self::generate)
/// call reaches the engine.
pub struct InferenceSession<E: Engine> {
    engine: Option<E>,
    engine_name: &'static str,
    model_path: PathBuf,
}

impl<E: Engine> InferenceSession<E> {
    /// Load `model_path` with the given engine factory.
    ///
    /// The engine receives `context` untouched and options holding only the
    /// model path. The path is not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError`] wrapping the engine's error when the
    /// engine rejects the configuration.
    pub fn create<F>(
        factory: &F,
        context: &F::Context,
        model_path: impl Into<PathBuf>,
    ) -> Result<Self, InitializationError>
    where
        F: EngineFactory<Engine = E>,
    {
        let model_path = model_path.into();
        let options = EngineOptions::new(model_path.clone());
        let engine_name = factory.name();

        let engine = factory
            .create(context, &options)
            .map_err(|source| InitializationError {
                engine: engine_name,
                path: model_path.clone(),
                source,
            })?;

        info!(
            engine = engine_name,
            model = %model_path.display(),
            "Inference session ready"
        );

        Ok(Self {
            engine: Some(engine),
            engine_name,
            model_path,
        })
    }

    /// Create a session, run `f` with it, then release it.
    ///
    /// The session is released before this returns, including when `f`
    /// panics; the panic is then resumed.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError`] if the session cannot be created, in
    /// which case `f` is never called.
    pub fn scoped<F, R>(
        factory: &F,
        context: &F::Context,
        model_path: impl Into<PathBuf>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, InitializationError>
    where
        F: EngineFactory<Engine = E>,
    {
        let mut session = Self::create(factory, context, model_path)?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(&mut session)));
        session.release();

        match outcome {
            Ok(value) => Ok(value),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Run one blocking generation.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Engine`] if the engine fails; the session
    /// stays usable. Returns [`InferenceError::Released`] if the session was
    /// already released.
    pub fn generate(&mut self, prompt: &str) -> Result<String, InferenceError> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(InferenceError::Released {
                path: self.model_path.clone(),
            });
        };

        debug!(
            engine = self.engine_name,
            prompt_len = prompt.len(),
            "Generating"
        );

        match engine.generate(prompt) {
            Ok(response) => {
                debug!(
                    engine = self.engine_name,
                    response_len = response.len(),
                    "Generation complete"
                );
                Ok(response)
            }
            Err(source) => {
                warn!(engine = self.engine_name, error = %source, "Generation failed");
                Err(InferenceError::Engine {
                    engine: self.engine_name,
                    source,
                })
            }
        }
    }

    /// Release the engine handle.
    ///
    /// Safe to call more than once; only the first call reaches the engine.
    pub fn release(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.release();
            info!(
                engine = self.engine_name,
                model = %self.model_path.display(),
                "Inference session released"
            );
        }
    }

    /// Model artifact this session is bound to.
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Name of the engine serving this session.
    #[must_use]
    pub fn engine_name(&self) -> &'static str {
        self.engine_name
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.engine.is_some() {
            SessionState::Ready
        } else {
            SessionState::Released
        }
    }

    /// True while the session accepts prompts.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }
}

impl<E: Engine> Drop for InferenceSession<E> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<E: Engine> std::fmt::Debug for InferenceSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceSession")
            .field("engine", &self.engine_name)
            .field("model_path", &self.model_path)
            .field("state", &self.state())
            .finish()
    }
}
