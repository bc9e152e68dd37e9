//! Fetch capabilities injected into the resolver
//!
//! The resolver never talks to a cluster or the network directly. It is
//! handed a [`KubeClient`] and/or an [`HttpClient`] and dispatches each
//! import reference to the matching one.

use devfile_api::Devfile;

/// Failure reported by a fetch capability
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The target does not exist
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl ClientError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Reads templates stored as Kubernetes resources
pub trait KubeClient: Send + Sync {
    fn get(&self, name: &str, namespace: &str) -> Result<Devfile, ClientError>;
}

/// Fetches templates over HTTP
pub trait HttpClient: Send + Sync {
    fn fetch_template(&self, url: &str) -> Result<Devfile, ClientError>;
}
