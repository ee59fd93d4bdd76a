//! Engine tuning and worker configuration.
//!
//! These settings belong to the engine backend and the worker queue. They
//! are applied when the backend factory is built and never travel in the
//! per-session engine options.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Model artifact location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    /// Path to the model file. Overridden by `ORACLE_MODEL_PATH`.
    #[serde(default)]
    pub path: String,
}

/// llama.cpp backend tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct LlamaCppConfig {
    /// Context window in tokens.
    ///
    /// Defaults to 2048.
    #[serde(default = "default_context_size")]
    pub context_size: u32,

    /// Upper bound on generated tokens per call.
    ///
    /// Defaults to 512.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Layers offloaded to the GPU. 0 keeps inference on the CPU.
    #[serde(default)]
    pub gpu_layers: u32,

    /// Inference threads. 0 uses the engine default.
    #[serde(default)]
    pub threads: u32,
}

impl LlamaCppConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.context_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llamacpp.context_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llamacpp.max_tokens",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for LlamaCppConfig {
    fn default() -> Self {
        Self {
            context_size: default_context_size(),
            max_tokens: default_max_tokens(),
            gpu_layers: 0,
            threads: 0,
        }
    }
}

/// Single-flight worker settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Prompts allowed to wait for the engine at once.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl WorkerConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.queue_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

const fn default_context_size() -> u32 {
    2048
}

const fn default_max_tokens() -> usize {
    512
}

const fn default_queue_capacity() -> usize {
    16
}
