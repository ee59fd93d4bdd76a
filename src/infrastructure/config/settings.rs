//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; `ORACLE_MODEL_PATH` overrides
//! the model path.
//!
//! # Example
//!
//! ```no_run
//! use oracle::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("oracle.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::engine::{LlamaCppConfig, ModelConfig, WorkerConfig};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `model.path`.
pub const MODEL_PATH_ENV: &str = "ORACLE_MODEL_PATH";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Model artifact to bind sessions to.
    #[serde(default)]
    pub model: ModelConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// llama.cpp backend tuning.
    #[serde(default)]
    pub llamacpp: LlamaCppConfig,

    /// Single-flight worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// Environment overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, apply environment overrides, and
    /// validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file and apply environment overrides
    /// without validating, so callers can layer further overrides first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replace the model path with `ORACLE_MODEL_PATH` when it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
            if !path.is_empty() {
                self.model.path = path;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.model.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "model.path",
            }
            .into());
        }
        self.logging.validate()?;
        self.llamacpp.validate()?;
        self.worker.validate()?;
        Ok(())
    }

    /// Model artifact path.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        PathBuf::from(&self.model.path)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse_toml("[model]\npath = \"models/tiny.gguf\"\n").unwrap();

        assert_eq!(config.model_path(), PathBuf::from("models/tiny.gguf"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.llamacpp.context_size, 2048);
        assert_eq!(config.llamacpp.max_tokens, 512);
        assert_eq!(config.llamacpp.gpu_layers, 0);
        assert_eq!(config.worker.queue_capacity, 16);
    }

    #[test]
    fn full_config_overrides_defaults() {
        let toml = r#"
[model]
path = "/sdcard/models/gemma.bin"

[logging]
level = "debug"
format = "json"

[llamacpp]
context_size = 4096
max_tokens = 128
gpu_layers = 33
threads = 4

[worker]
queue_capacity = 2
"#;
        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.llamacpp.context_size, 4096);
        assert_eq!(config.llamacpp.max_tokens, 128);
        assert_eq!(config.llamacpp.gpu_layers, 33);
        assert_eq!(config.llamacpp.threads, 4);
        assert_eq!(config.worker.queue_capacity, 2);
    }

    #[test]
    fn missing_model_path_is_rejected() {
        let result = Config::parse_toml("[logging]\nlevel = \"info\"\n");

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "model.path"
            }))
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let toml = "[model]\npath = \"m.gguf\"\n[logging]\nformat = \"xml\"\n";

        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, reason })) => {
                assert_eq!(field, "logging.format");
                assert!(reason.contains("xml"));
            }
            other => panic!("expected invalid logging.format, got {other:?}"),
        }
    }

    #[test]
    fn zero_limits_are_rejected() {
        for (toml, expected) in [
            ("[llamacpp]\nmax_tokens = 0\n", "llamacpp.max_tokens"),
            ("[llamacpp]\ncontext_size = 0\n", "llamacpp.context_size"),
            ("[worker]\nqueue_capacity = 0\n", "worker.queue_capacity"),
        ] {
            let content = format!("[model]\npath = \"m.gguf\"\n{toml}");
            match Config::parse_toml(&content) {
                Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                    assert_eq!(field, expected);
                }
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml("[model\npath = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
