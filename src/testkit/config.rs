//! Canonical test configurations.
//!
//! Single source of truth for config values used across tests.

use crate::infrastructure::config::settings::Config;

/// Minimal valid TOML pointing at `model_path`.
pub fn minimal_toml(model_path: &str) -> String {
    format!("[model]\npath = \"{model_path}\"\n")
}

/// Parsed configuration with defaults for everything except the model path.
pub fn config(model_path: &str) -> Config {
    match Config::parse_toml(&minimal_toml(model_path)) {
        Ok(config) => config,
        Err(err) => panic!("testkit config must parse: {err}"),
    }
}
