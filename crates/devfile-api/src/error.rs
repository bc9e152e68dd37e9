//! Error types for devfile-api

/// Result type for devfile-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding or encoding template documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} document: {message}")]
    Parse { format: String, message: String },

    #[error("Failed to serialize {format} document: {message}")]
    Serialize { format: String, message: String },

    /// A tagged union declared zero or several of its members
    #[error("{kind} '{name}' {reason}")]
    InvalidUnion {
        kind: String,
        name: String,
        reason: String,
    },
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn serialize(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialize {
            format: format.into(),
            message: message.into(),
        }
    }

    pub(crate) fn union(
        kind: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidUnion {
            kind: kind.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Pick the single populated member of a tagged union.
///
/// `members` holds one entry per union member, `None` when unset.
pub(crate) fn exactly_one<T>(kind: &str, name: &str, members: Vec<Option<T>>) -> Result<T> {
    let mut set: Vec<T> = members.into_iter().flatten().collect();
    match set.len() {
        1 => Ok(set.remove(0)),
        0 => Err(Error::union(kind, name, "does not define any type")),
        n => Err(Error::union(
            kind,
            name,
            format!("defines {n} types, exactly one is allowed"),
        )),
    }
}
