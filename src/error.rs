//! Error types for the crate.
//!
//! Session errors carry the engine's own error as their `source` so callers
//! can inspect the original cause. Nothing is translated or recovered here.

use std::path::PathBuf;

use thiserror::Error;

use crate::port::outbound::engine::EngineError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// The engine could not be brought to a ready state.
#[derive(Error, Debug)]
#[error("{engine} engine failed to load model {}: {source}", .path.display())]
pub struct InitializationError {
    /// Name of the engine that rejected the configuration.
    pub engine: &'static str,
    /// Model path the session was asked to bind to.
    pub path: PathBuf,
    #[source]
    pub source: EngineError,
}

/// The engine could not produce a response.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("{engine} engine failed to generate: {source}")]
    Engine {
        engine: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("session for {} has been released", .path.display())]
    Released { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
