//! LLM completion port for concurrent callers.
//!
//! Async counterpart of the blocking session API. Lets several tasks share
//! one loaded model through a queue without knowing which engine serves it.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) to support concurrent
/// completion requests.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine fails or is no longer
    /// available.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
