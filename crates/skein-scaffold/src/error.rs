//! Error types for project generation

use std::path::PathBuf;
use thiserror::Error;

/// The options record violates one of its field rules.
///
/// Raised before any file is written; nothing in the pipeline recovers from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("project path must not be empty")]
    EmptyProjectPath,

    #[error("invalid local storage path '{path}': {reason}")]
    InvalidStoragePath { path: String, reason: &'static str },

    #[error("failed to parse answers: {0}")]
    Parse(String),
}

/// Errors surfaced by the generation pipeline
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {artifact}: {message}")]
    Render {
        artifact: &'static str,
        message: String,
    },

    #[error("failed to serialize {artifact}: {message}")]
    Serialize {
        artifact: &'static str,
        message: String,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(artifact: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Render {
            artifact,
            message: err.to_string(),
        }
    }

    pub(crate) fn serialize(artifact: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Serialize {
            artifact,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
