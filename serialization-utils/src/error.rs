//! Error types and result definitions.

use std::{io, path::PathBuf};

/// Errors returned by the JSON, configuration and file helpers.
///
/// The transparent variants pass the underlying error through unchanged, so
/// the message a caller sees is exactly what `serde_json` or the I/O layer
/// reported.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Serialization or deserialization failure reported by `serde_json`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Read or write failure on the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed TOML configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A file could not be opened or created.
    #[error("failed to access {}: {source}", path.display())]
    File {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
