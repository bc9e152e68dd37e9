//! Import references, parent and plugin descriptors
//!
//! A devfile can pull content from elsewhere in two ways: a single `parent`
//! whose content seeds the document, and any number of `plugin` components
//! whose content is inlined as a group. Both carry an [`ImportReference`]
//! naming where the content lives, plus optional override directives.
//!
//! # Example YAML
//!
//! ```yaml
//! parent:
//!   id: nodejs
//!   registryUrl: https://registry.devfile.io
//!   components:
//!     - name: runtime
//!       container:
//!         memoryLimit: 1Gi
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Location of a template stored as a Kubernetes resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KubernetesReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Where an imported template lives.
///
/// Exactly one location kind is populated; documents declaring several are
/// rejected when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportReference {
    Kubernetes(KubernetesReference),
    Uri(String),
    Id {
        id: String,
        registry_url: Option<String>,
    },
}

impl ImportReference {
    pub fn kubernetes(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self::Kubernetes(KubernetesReference {
            name: name.into(),
            namespace: namespace.map(str::to_string),
        })
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    pub fn id(id: impl Into<String>, registry_url: Option<&str>) -> Self {
        Self::Id {
            id: id.into(),
            registry_url: registry_url.map(str::to_string),
        }
    }

    /// Short human-readable form used in log lines and error chains
    pub fn describe(&self) -> String {
        match self {
            Self::Kubernetes(k) => match &k.namespace {
                Some(ns) => format!("kubernetes:{}/{}", ns, k.name),
                None => format!("kubernetes:{}", k.name),
            },
            Self::Uri(uri) => format!("uri:{uri}"),
            Self::Id { id, registry_url } => match registry_url {
                Some(url) => format!("id:{id}@{url}"),
                None => format!("id:{id}"),
            },
        }
    }
}

/// Wire shape of an import reference: all location kinds as optional fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawImportReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kubernetes: Option<KubernetesReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    registry_url: Option<String>,
}

impl RawImportReference {
    /// Decode into a typed reference. No populated kind yields `Ok(None)`.
    fn into_reference(self, kind: &str, name: &str) -> Result<Option<ImportReference>> {
        if self.registry_url.is_some() && self.id.is_none() {
            return Err(Error::union(kind, name, "sets registryUrl without an id"));
        }
        let mut set: Vec<ImportReference> = [
            self.kubernetes.map(ImportReference::Kubernetes),
            self.uri.map(ImportReference::Uri),
            self.id.map(|id| ImportReference::Id {
                id,
                registry_url: self.registry_url,
            }),
        ]
        .into_iter()
        .flatten()
        .collect();
        match set.len() {
            0 => Ok(None),
            1 => Ok(Some(set.remove(0))),
            _ => Err(Error::union(
                kind,
                name,
                "defines more than one import location (kubernetes, uri, id)",
            )),
        }
    }
}

impl From<Option<ImportReference>> for RawImportReference {
    fn from(reference: Option<ImportReference>) -> Self {
        match reference {
            None => Self::default(),
            Some(ImportReference::Kubernetes(k)) => Self {
                kubernetes: Some(k),
                ..Self::default()
            },
            Some(ImportReference::Uri(uri)) => Self {
                uri: Some(uri),
                ..Self::default()
            },
            Some(ImportReference::Id { id, registry_url }) => Self {
                id: Some(id),
                registry_url,
                ..Self::default()
            },
        }
    }
}

/// Override directives for a parent.
///
/// Each entry is a partial element: it names the element it patches
/// (`name`, or `id` for commands) and carries only the fields to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starter_projects: Vec<Value>,
}

impl Overrides {
    /// True when no override list has any entry
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
            && self.commands.is_empty()
            && self.projects.is_empty()
            && self.starter_projects.is_empty()
    }
}

/// Override directives for a plugin: components and commands only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOverrides {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Value>,
}

impl PluginOverrides {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.commands.is_empty()
    }
}

impl From<PluginOverrides> for Overrides {
    fn from(plugin: PluginOverrides) -> Self {
        Self {
            components: plugin.components,
            commands: plugin.commands,
            ..Self::default()
        }
    }
}

/// The `parent` section of a devfile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParent", into = "RawParent")]
pub struct Parent {
    /// `None` when the document names no location at all
    pub import: Option<ImportReference>,
    pub overrides: Overrides,
}

impl Parent {
    pub fn new(import: ImportReference) -> Self {
        Self {
            import: Some(import),
            overrides: Overrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParent {
    #[serde(flatten)]
    reference: RawImportReference,
    #[serde(flatten)]
    overrides: Overrides,
}

impl TryFrom<RawParent> for Parent {
    type Error = Error;

    fn try_from(raw: RawParent) -> Result<Self> {
        Ok(Self {
            import: raw.reference.into_reference("parent", "parent")?,
            overrides: raw.overrides,
        })
    }
}

impl From<Parent> for RawParent {
    fn from(parent: Parent) -> Self {
        Self {
            reference: parent.import.into(),
            overrides: parent.overrides,
        }
    }
}

/// The `plugin` member of a component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlugin", into = "RawPlugin")]
pub struct PluginComponent {
    pub import: Option<ImportReference>,
    pub overrides: PluginOverrides,
}

impl PluginComponent {
    pub fn new(import: ImportReference) -> Self {
        Self {
            import: Some(import),
            overrides: PluginOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: PluginOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlugin {
    #[serde(flatten)]
    reference: RawImportReference,
    #[serde(flatten)]
    overrides: PluginOverrides,
}

impl TryFrom<RawPlugin> for PluginComponent {
    type Error = Error;

    fn try_from(raw: RawPlugin) -> Result<Self> {
        Ok(Self {
            import: raw.reference.into_reference("plugin", "plugin")?,
            overrides: raw.overrides,
        })
    }
}

impl From<PluginComponent> for RawPlugin {
    fn from(plugin: PluginComponent) -> Self {
        Self {
            reference: plugin.import.into(),
            overrides: plugin.overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parent_with_registry_id() {
        let yaml = r#"
id: nodejs
registryUrl: https://registry.devfile.io
"#;
        let parent: Parent = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parent.import,
            Some(ImportReference::id("nodejs", Some("https://registry.devfile.io")))
        );
        assert!(parent.overrides.is_empty());
    }

    #[test]
    fn parent_keeps_override_lists() {
        let yaml = r#"
uri: https://example.com/devfile.yaml
components:
  - name: runtime
    container:
      memoryLimit: 2Gi
starterProjects:
  - name: starter
    description: patched
"#;
        let parent: Parent = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parent.import,
            Some(ImportReference::uri("https://example.com/devfile.yaml"))
        );
        assert_eq!(parent.overrides.components.len(), 1);
        assert_eq!(parent.overrides.starter_projects.len(), 1);
        assert!(parent.overrides.commands.is_empty());
    }

    #[test]
    fn parent_without_location_decodes_to_none() {
        let parent: Parent = serde_yaml::from_str("components: []").unwrap();
        assert!(parent.import.is_none());
    }

    #[test]
    fn two_locations_are_rejected() {
        let yaml = r#"
uri: https://example.com/devfile.yaml
id: nodejs
"#;
        let err = serde_yaml::from_str::<Parent>(yaml).unwrap_err();
        assert!(err.to_string().contains("more than one import location"));
    }

    #[test]
    fn registry_url_requires_id() {
        let yaml = "registryUrl: https://registry.devfile.io\n";
        let err = serde_yaml::from_str::<PluginComponent>(yaml).unwrap_err();
        assert!(err.to_string().contains("registryUrl without an id"));
    }

    #[test]
    fn kubernetes_plugin_round_trips_wire_shape() {
        let plugin = PluginComponent::new(ImportReference::kubernetes("tpl", Some("ns1")));
        let json = serde_json::to_value(&plugin).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kubernetes": {"name": "tpl", "namespace": "ns1"}})
        );
    }

    #[test]
    fn plugin_overrides_widen_to_overrides() {
        let plugin = PluginOverrides {
            components: vec![serde_json::json!({"name": "a"})],
            commands: vec![],
        };
        let widened = Overrides::from(plugin);
        assert_eq!(widened.components.len(), 1);
        assert!(widened.projects.is_empty());
        assert!(!widened.is_empty());
    }

    #[test]
    fn describe_formats_each_kind() {
        assert_eq!(
            ImportReference::kubernetes("tpl", Some("ns")).describe(),
            "kubernetes:ns/tpl"
        );
        assert_eq!(ImportReference::uri("http://x").describe(), "uri:http://x");
        assert_eq!(ImportReference::id("p", None).describe(), "id:p");
    }
}
