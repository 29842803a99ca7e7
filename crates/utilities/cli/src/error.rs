//! Error types for CLI utilities.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The chain configuration file could not be read.
    #[error("failed to read chain config {path}: {source}")]
    ReadChainConfig {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The chain configuration file is not valid JSON.
    #[error("invalid JSON chain config: {0}")]
    Json(#[from] serde_json::Error),

    /// The chain configuration file is not valid TOML.
    #[error("invalid TOML chain config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The chain configuration file has neither a `.json` nor a `.toml` extension.
    #[error("unsupported chain config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The global tracing subscriber could not be installed.
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
