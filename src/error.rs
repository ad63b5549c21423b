use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for niopd operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Unsupported IDE profile identifier.
    #[error("Unknown IDE profile '{0}': must be one of claude, iflow")]
    UnknownProfile(String),

    /// Source directory for a materialization call does not exist.
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// A placeholder survived substitution while strict mode was requested.
    #[error("Unresolved placeholder '{{{{{name}}}}}' in {file}")]
    UnresolvedPlaceholder { file: String, name: String },

    /// Manifest serialization failed.
    #[error("Failed to serialize install manifest: {0}")]
    ManifestSerialize(#[from] toml::ser::Error),
}

impl AppError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::UnknownProfile(_)
            | AppError::ManifestSerialize(_) => io::ErrorKind::InvalidInput,
            AppError::SourceNotFound(_) => io::ErrorKind::NotFound,
            AppError::UnresolvedPlaceholder { .. } => io::ErrorKind::InvalidData,
        }
    }
}
