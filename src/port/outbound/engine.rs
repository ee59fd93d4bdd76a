//! Inference engine port.
//!
//! An engine is split into a factory, which knows how to load a model
//! inside some host context, and the loaded handle itself. Real bindings,
//! out-of-process stubs and test fakes all plug in here.

use crate::domain::EngineOptions;

/// Error raised by an engine implementation.
///
/// Kept opaque so backend errors pass through without translation.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Creates loaded engine handles.
pub trait EngineFactory {
    /// Host integration handle required by the engine.
    ///
    /// Sessions pass it through unmodified.
    type Context: ?Sized;

    /// Loaded model handle produced by [`create`](Self::create).
    type Engine: Engine;

    /// Return the engine name for logging and error reporting.
    fn name(&self) -> &'static str;

    /// Load the model described by `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the configuration, for example
    /// a missing or corrupt model file or unsupported hardware.
    fn create(
        &self,
        context: &Self::Context,
        options: &EngineOptions,
    ) -> Result<Self::Engine, EngineError>;
}

/// A loaded model that maps prompts to responses.
///
/// Implementations need not be thread-safe. Callers hold exclusive access
/// for the duration of each call.
pub trait Engine {
    /// Run one blocking generation and return the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot produce a result.
    fn generate(&mut self, prompt: &str) -> Result<String, EngineError>;

    /// Free native resources held by the handle.
    ///
    /// Called at most once per handle. Handles that free everything on drop
    /// can rely on the default.
    fn release(&mut self) {}
}
