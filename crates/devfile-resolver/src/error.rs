//! Error types for devfile-resolver

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution.
///
/// Every variant is fatal for the whole call: no partially flattened
/// document is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A client or default required by the reference kind is missing
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The import declares none of `kubernetes`, `uri` or `id`
    #[error("import reference of '{component}' does not define any resources")]
    Reference { component: String },

    /// The upstream source reports that the target does not exist
    #[error("failed to resolve '{component}': {target} not found")]
    NotFound { component: String, target: String },

    /// Any other transport or decoding failure
    #[error("failed to fetch '{component}'{}: {message}", registry_suffix(.registry_url))]
    Fetch {
        component: String,
        registry_url: Option<String>,
        message: String,
    },

    /// Resolved content still contains a nested parent or plugin where unsupported
    #[error("'{component}' cannot be inlined: {reason}")]
    Structural { component: String, reason: String },

    /// An import reference repeats along the current resolution path
    #[error("devfile has a cycle in references: {chain}")]
    Cycle { chain: String },

    /// The merger rejected a merge or override step
    #[error("merge failed: {0}")]
    Merge(#[from] devfile_merge::Error),
}

fn registry_suffix(registry_url: &Option<String>) -> String {
    match registry_url {
        Some(url) => format!(" from registry {url}"),
        None => String::new(),
    }
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn structural(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structural {
            component: component.into(),
            reason: reason.into(),
        }
    }
}
