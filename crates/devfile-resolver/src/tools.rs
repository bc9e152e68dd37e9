//! Resolver configuration: defaults and injected fetch capabilities

use std::fmt;
use std::sync::Arc;

use crate::client::{HttpClient, KubeClient};

/// Everything the resolver needs from its caller.
///
/// All fields are optional; a reference kind whose client or default is
/// missing fails with a configuration error when it is encountered.
///
/// # Example
///
/// ```
/// use devfile_resolver::ResolverTools;
///
/// let tools = ResolverTools::new()
///     .with_default_namespace("workspaces")
///     .with_default_registry_url("https://registry.devfile.io");
///
/// assert_eq!(tools.default_namespace(), Some("workspaces"));
/// assert!(tools.http_client().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ResolverTools {
    default_namespace: Option<String>,
    default_registry_url: Option<String>,
    kube_client: Option<Arc<dyn KubeClient>>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl ResolverTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace used for Kubernetes references that omit one
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = non_empty(namespace.into());
        self
    }

    /// Registry base URL used for id references that omit one
    pub fn with_default_registry_url(mut self, url: impl Into<String>) -> Self {
        self.default_registry_url = non_empty(url.into());
        self
    }

    pub fn with_kube_client(mut self, client: Arc<dyn KubeClient>) -> Self {
        self.kube_client = Some(client);
        self
    }

    pub fn with_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    pub fn default_registry_url(&self) -> Option<&str> {
        self.default_registry_url.as_deref()
    }

    pub fn kube_client(&self) -> Option<&dyn KubeClient> {
        self.kube_client.as_deref()
    }

    pub fn http_client(&self) -> Option<&dyn HttpClient> {
        self.http_client.as_deref()
    }
}

impl fmt::Debug for ResolverTools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverTools")
            .field("default_namespace", &self.default_namespace)
            .field("default_registry_url", &self.default_registry_url)
            .field("kube_client", &self.kube_client.is_some())
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_defaults_are_treated_as_unset() {
        let tools = ResolverTools::new()
            .with_default_namespace("")
            .with_default_registry_url("  ");
        assert!(tools.default_namespace().is_none());
        assert!(tools.default_registry_url().is_none());
    }

    #[test]
    fn debug_hides_client_internals() {
        let tools = ResolverTools::new().with_default_namespace("ns1");
        let debug = format!("{tools:?}");
        assert!(debug.contains("ns1"));
        assert!(debug.contains("kube_client: false"));
    }
}
