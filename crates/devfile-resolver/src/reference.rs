//! Reference dispatch: fetch the raw template an import points to
//!
//! Each reference kind has its own strategy. Defaults from
//! [`ResolverTools`] are applied to a copy of the reference, never to the
//! caller's document. The fetched template is returned as-is: it may still
//! contain a parent or plugins, and flattening it is the resolver's job.

use devfile_api::{Devfile, ImportReference, KubernetesReference};

use crate::client::ClientError;
use crate::error::{Error, Result};
use crate::tools::ResolverTools;

/// Copy `reference`, filling an empty namespace or registry URL from `tools`
pub fn with_defaults(reference: &ImportReference, tools: &ResolverTools) -> ImportReference {
    match reference {
        ImportReference::Kubernetes(k) => ImportReference::Kubernetes(KubernetesReference {
            name: k.name.clone(),
            namespace: non_empty(k.namespace.as_deref())
                .or(tools.default_namespace())
                .map(str::to_string),
        }),
        ImportReference::Uri(uri) => ImportReference::Uri(uri.clone()),
        ImportReference::Id { id, registry_url } => ImportReference::Id {
            id: id.clone(),
            registry_url: non_empty(registry_url.as_deref())
                .or(tools.default_registry_url())
                .map(str::to_string),
        },
    }
}

/// Fetch the template `reference` points to on behalf of `component`
pub fn fetch_reference(
    component: &str,
    reference: &ImportReference,
    tools: &ResolverTools,
) -> Result<Devfile> {
    let reference = with_defaults(reference, tools);
    tracing::debug!(component, reference = %reference.describe(), "Fetching import");
    match &reference {
        ImportReference::Kubernetes(k) => fetch_kubernetes(component, k, tools),
        ImportReference::Uri(uri) => fetch_uri(component, uri, tools),
        ImportReference::Id { id, registry_url } => {
            fetch_registry(component, id, registry_url.as_deref(), tools)
        }
    }
}

/// Registry URL joined with `id` as a final path segment
pub fn registry_template_url(registry_url: &str, id: &str) -> String {
    format!(
        "{}/{}",
        registry_url.trim_end_matches('/'),
        id.trim_start_matches('/')
    )
}

fn fetch_kubernetes(
    component: &str,
    reference: &KubernetesReference,
    tools: &ResolverTools,
) -> Result<Devfile> {
    let Some(namespace) = non_empty(reference.namespace.as_deref()) else {
        return Err(Error::configuration(format!(
            "'{component}' references Kubernetes template '{}' without a namespace and no default namespace is configured",
            reference.name
        )));
    };
    let Some(client) = tools.kube_client() else {
        return Err(Error::configuration(format!(
            "'{component}' references a Kubernetes template but no Kubernetes client is configured"
        )));
    };

    client
        .get(&reference.name, namespace)
        .map_err(|e| match e {
            ClientError::NotFound(_) => Error::NotFound {
                component: component.to_string(),
                target: format!("template {namespace}/{}", reference.name),
            },
            ClientError::Other(message) => Error::Fetch {
                component: component.to_string(),
                registry_url: None,
                message,
            },
        })
}

fn fetch_uri(component: &str, uri: &str, tools: &ResolverTools) -> Result<Devfile> {
    let Some(client) = tools.http_client() else {
        return Err(Error::configuration(format!(
            "'{component}' references a URI but no HTTP client is configured"
        )));
    };

    client.fetch_template(uri).map_err(|e| match e {
        ClientError::NotFound(_) => Error::NotFound {
            component: component.to_string(),
            target: uri.to_string(),
        },
        ClientError::Other(message) => Error::Fetch {
            component: component.to_string(),
            registry_url: None,
            message,
        },
    })
}

fn fetch_registry(
    component: &str,
    id: &str,
    registry_url: Option<&str>,
    tools: &ResolverTools,
) -> Result<Devfile> {
    let Some(registry_url) = non_empty(registry_url) else {
        return Err(Error::configuration(format!(
            "'{component}' references registry id '{id}' without a registry URL and no default registry URL is configured"
        )));
    };
    let Some(client) = tools.http_client() else {
        return Err(Error::configuration(format!(
            "'{component}' references a registry id but no HTTP client is configured"
        )));
    };

    let url = registry_template_url(registry_url, id);
    client.fetch_template(&url).map_err(|e| match e {
        ClientError::NotFound(_) => Error::NotFound {
            component: component.to_string(),
            target: url.clone(),
        },
        ClientError::Other(message) => Error::Fetch {
            component: component.to_string(),
            registry_url: Some(registry_url.to_string()),
            message,
        },
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
