//! Engine configuration value.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Options handed to an engine when a session is created.
///
/// The only recognised option is the model path. The field is private and
/// there are no setters, so a value built here can never carry anything
/// else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    model_path: PathBuf,
}

impl EngineOptions {
    /// Build options pointing at a model artifact.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }

    /// Location of the model artifact.
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl fmt::Display for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modelPath={}", self.model_path.display())
    }
}
