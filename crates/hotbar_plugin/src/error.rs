//! # Plugin Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or running the plugin.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Reading or writing the config file failed.
    #[error("config io error at {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but its values are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A permission was granted before being registered.
    #[error("permission not registered: {0}")]
    UnknownPermission(String),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
