// ghostink CLI - error types
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Error types for the command-line front end.

use ghostink::GhostError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed
    #[error("Failed to write output: {0}")]
    Stdout(#[source] std::io::Error),

    /// The codec rejected the input or configuration
    #[error(transparent)]
    Codec(#[from] GhostError),

    /// Input for decode/analyze is not UTF-8 text
    #[error("{path} is not UTF-8 text")]
    NotText { path: PathBuf },

    /// Input for decode holds no encoded stream
    #[error("No encoded stream found in {path}")]
    NoStream { path: PathBuf },

    /// JSON rendering failed
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
