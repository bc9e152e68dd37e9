//! Error types for devfile-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error reading or writing a devfile
    #[error(transparent)]
    Api(#[from] devfile_api::Error),

    /// Error from the resolver
    #[error(transparent)]
    Resolve(#[from] devfile_resolver::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Config file could not be read or parsed
    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Wrap a failure on `path` with the file it concerns
    pub fn io_at(path: &std::path::Path, error: std::io::Error) -> Self {
        Self::user(format!("{}: {error}", path.display()))
    }
}
