use std::io;

use crate::stage::LifecycleStage;

/// Errors that can occur while loading modules or assembling a host
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to construct module '{module}': {source}")]
    Construction {
        module: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Module '{module}' failed during {stage}: {source}")]
    Hook {
        module: String,
        stage: LifecycleStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("Duplicate route: {method} {path}")]
    DuplicateRoute { method: String, path: String },

    #[error("Service not registered: {name}")]
    ServiceNotFound { name: String },

    #[error("Service '{name}' is not of type {expected}")]
    ServiceTypeMismatch { name: String, expected: &'static str },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Name of the module that caused the error, if any
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::Construction { module, .. } | Error::Hook { module, .. } => Some(module),
            _ => None,
        }
    }

    /// Lifecycle stage that was running when a hook failed
    pub fn stage(&self) -> Option<LifecycleStage> {
        match self {
            Error::Hook { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for modhost operations
pub type Result<T> = std::result::Result<T, Error>;
