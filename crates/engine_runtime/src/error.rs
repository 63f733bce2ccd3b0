//! Runtime error types.

use std::path::PathBuf;

/// Errors raised by the script runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// No class with this name has been registered.
    #[error("script class `{0}` is not registered")]
    UnknownClass(String),

    /// A class with this name is already registered.
    #[error("script class `{0}` is already registered")]
    DuplicateClass(String),

    /// Instances can only be created between start and stop.
    #[error("script runtime has not been started")]
    NotStarted,

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`RuntimeConfig`](crate::RuntimeConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The config parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
