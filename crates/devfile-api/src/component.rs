//! Component definitions
//!
//! A component is a named unit of the workspace: a container, a volume,
//! a Kubernetes manifest, an image build, or a plugin that pulls in a whole
//! set of components from another template.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Attributes;
use crate::error::{Error, Result, exactly_one};
use crate::import::PluginComponent;

/// A named component carrying exactly one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComponent", into = "RawComponent")]
pub struct Component {
    pub name: String,
    pub attributes: Attributes,
    pub kind: ComponentKind,
}

/// The populated member of a component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Container(ContainerComponent),
    Volume(VolumeComponent),
    Kubernetes(KubernetesComponent),
    Openshift(KubernetesComponent),
    Image(ImageComponent),
    Plugin(PluginComponent),
}

impl ComponentKind {
    /// Wire key of this kind (`container`, `volume`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Container(_) => "container",
            Self::Volume(_) => "volume",
            Self::Kubernetes(_) => "kubernetes",
            Self::Openshift(_) => "openshift",
            Self::Image(_) => "image",
            Self::Plugin(_) => "plugin",
        }
    }
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            kind,
        }
    }

    pub fn container(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self::new(
            name,
            ComponentKind::Container(ContainerComponent {
                image: image.into(),
                ..ContainerComponent::default()
            }),
        )
    }

    pub fn volume(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Volume(VolumeComponent::default()))
    }

    pub fn plugin(name: impl Into<String>, plugin: PluginComponent) -> Self {
        Self::new(name, ComponentKind::Plugin(plugin))
    }

    pub fn is_plugin(&self) -> bool {
        matches!(self.kind, ComponentKind::Plugin(_))
    }

    pub fn as_plugin(&self) -> Option<&PluginComponent> {
        match &self.kind {
            ComponentKind::Plugin(plugin) => Some(plugin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub name: String,
    pub target_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerComponent {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_sources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mapping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_pod: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

/// Shared shape of `kubernetes` and `openshift` components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_by_default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub image_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_build: Option<bool>,
    /// Build definition, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    container: Option<ContainerComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume: Option<VolumeComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kubernetes: Option<KubernetesComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    openshift: Option<KubernetesComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImageComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plugin: Option<PluginComponent>,
}

impl TryFrom<RawComponent> for Component {
    type Error = Error;

    fn try_from(raw: RawComponent) -> Result<Self> {
        let kind = exactly_one(
            "component",
            &raw.name,
            vec![
                raw.container.map(ComponentKind::Container),
                raw.volume.map(ComponentKind::Volume),
                raw.kubernetes.map(ComponentKind::Kubernetes),
                raw.openshift.map(ComponentKind::Openshift),
                raw.image.map(ComponentKind::Image),
                raw.plugin.map(ComponentKind::Plugin),
            ],
        )?;
        Ok(Self {
            name: raw.name,
            attributes: raw.attributes,
            kind,
        })
    }
}

impl From<Component> for RawComponent {
    fn from(component: Component) -> Self {
        let mut raw = RawComponent {
            name: component.name,
            attributes: component.attributes,
            container: None,
            volume: None,
            kubernetes: None,
            openshift: None,
            image: None,
            plugin: None,
        };
        match component.kind {
            ComponentKind::Container(c) => raw.container = Some(c),
            ComponentKind::Volume(v) => raw.volume = Some(v),
            ComponentKind::Kubernetes(k) => raw.kubernetes = Some(k),
            ComponentKind::Openshift(o) => raw.openshift = Some(o),
            ComponentKind::Image(i) => raw.image = Some(i),
            ComponentKind::Plugin(p) => raw.plugin = Some(p),
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportReference;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn container_component_from_yaml() {
        let yaml = r#"
name: runtime
container:
  image: node:18
  memoryLimit: 1Gi
  endpoints:
    - name: http
      targetPort: 3000
  env:
    - name: PORT
      value: "3000"
"#;
        let component: Component = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(component.name, "runtime");
        let ComponentKind::Container(container) = &component.kind else {
            panic!("expected container, got {:?}", component.kind);
        };
        assert_eq!(container.image, "node:18");
        assert_eq!(container.memory_limit.as_deref(), Some("1Gi"));
        assert_eq!(container.endpoints[0].target_port, 3000);
        assert_eq!(container.env[0].value, "3000");
    }

    #[test]
    fn plugin_component_from_yaml() {
        let yaml = r#"
name: c1
plugin:
  id: plugin1
  components:
    - name: server
      container:
        image: other
"#;
        let component: Component = serde_yaml::from_str(yaml).unwrap();
        assert!(component.is_plugin());
        let plugin = component.as_plugin().unwrap();
        assert_eq!(plugin.import, Some(ImportReference::id("plugin1", None)));
        assert_eq!(plugin.overrides.components.len(), 1);
    }

    #[rstest]
    #[case("name: empty\n", "does not define any type")]
    #[case(
        "name: both\nvolume: {}\ncontainer:\n  image: x\n",
        "defines 2 types, exactly one is allowed"
    )]
    fn component_kind_must_be_unique(#[case] yaml: &str, #[case] message: &str) {
        let err = serde_yaml::from_str::<Component>(yaml).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn attributes_are_preserved() {
        let yaml = r#"
name: data
attributes:
  api.devfile.io/imported-from: parent
volume:
  size: 1Gi
"#;
        let component: Component = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            component.attributes["api.devfile.io/imported-from"],
            serde_json::json!("parent")
        );
        assert_eq!(component.kind.key(), "volume");
    }

    #[test]
    fn serializes_kind_under_its_key() {
        let component = Component::container("tools", "quay.io/tools:latest");
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "tools", "container": {"image": "quay.io/tools:latest"}})
        );
    }
}
