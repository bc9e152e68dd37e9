//! Error types for devfile-merge

use crate::ElementKind;

/// Result type for merge and override operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing template content
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The same key is contributed by two sources
    #[error("duplicate {kind} '{key}': defined in {first} and in {second}")]
    DuplicateKey {
        kind: ElementKind,
        key: String,
        first: String,
        second: String,
    },

    /// Override entries whose key matches no existing element
    #[error("some {kind}s do not override any existing element: {}", keys.join(", "))]
    UnmatchedOverride { kind: ElementKind, keys: Vec<String> },

    /// An override entry is malformed or produces an invalid element
    #[error("invalid override for {kind} '{key}': {reason}")]
    InvalidOverride {
        kind: ElementKind,
        key: String,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_override(
        kind: ElementKind,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOverride {
            kind,
            key: key.into(),
            reason: reason.into(),
        }
    }
}
