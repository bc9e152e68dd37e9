//! Top-level devfile document and its template content

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::Command;
use crate::component::Component;
use crate::error::{Error, Result};
use crate::import::Parent;
use crate::project::{Project, StarterProject};

/// Document metadata; unknown keys are carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Lifecycle bindings: lists of command ids run at each phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Events {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_start: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_start: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_stop: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_stop: Vec<String>,
}

impl Events {
    pub fn is_empty(&self) -> bool {
        self.pre_start.is_empty()
            && self.post_start.is_empty()
            && self.pre_stop.is_empty()
            && self.post_stop.is_empty()
    }
}

/// The body of a template: everything except schema version, metadata and parent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starter_projects: Vec<StarterProject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Events>,
}

impl TemplateContent {
    /// True when any component is a plugin
    pub fn has_plugins(&self) -> bool {
        self.components.iter().any(Component::is_plugin)
    }

    /// Names of the plugin components, in declaration order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|c| c.is_plugin())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// A devfile document
///
/// # Example
///
/// ```
/// use devfile_api::Devfile;
///
/// let devfile = Devfile::from_yaml(r#"
/// schemaVersion: 2.2.0
/// components:
///   - name: runtime
///     container:
///       image: node:18
/// "#).unwrap();
///
/// assert!(devfile.is_flat());
/// assert_eq!(devfile.content.components[0].name, "runtime");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devfile {
    /// Empty for templates fetched from sources that omit it
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(flatten)]
    pub content: TemplateContent,
}

impl Devfile {
    pub fn new(content: TemplateContent) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// Parse a devfile from YAML (JSON documents are accepted too)
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::serialize("YAML", e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::serialize("JSON", e.to_string()))
    }

    /// A document is flat when it has no parent and no plugin component
    pub fn is_flat(&self) -> bool {
        self.parent.is_none() && !self.content.has_plugins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportReference;
    use pretty_assertions::assert_eq;

    const NODEJS: &str = r#"
schemaVersion: 2.2.0
metadata:
  name: nodejs
  displayName: Node.js Runtime
parent:
  id: base
components:
  - name: runtime
    container:
      image: node:18
  - name: tools
    plugin:
      uri: https://example.com/tools.yaml
commands:
  - id: run
    exec:
      component: runtime
      commandLine: npm start
events:
  postStart: [run]
"#;

    #[test]
    fn parses_full_document() {
        let devfile = Devfile::from_yaml(NODEJS).unwrap();
        assert_eq!(devfile.schema_version, "2.2.0");
        let metadata = devfile.metadata.as_ref().unwrap();
        assert_eq!(metadata.name.as_deref(), Some("nodejs"));
        assert_eq!(metadata.extra["displayName"], "Node.js Runtime");
        assert_eq!(
            devfile.parent.as_ref().unwrap().import,
            Some(ImportReference::id("base", None))
        );
        assert_eq!(devfile.content.components.len(), 2);
        assert_eq!(devfile.content.plugin_names(), vec!["tools"]);
        assert_eq!(devfile.content.events.as_ref().unwrap().post_start, vec!["run"]);
        assert!(!devfile.is_flat());
    }

    #[test]
    fn flat_when_no_parent_and_no_plugins() {
        let mut devfile = Devfile::from_yaml(NODEJS).unwrap();
        devfile.parent = None;
        assert!(!devfile.is_flat());
        devfile.content.components.retain(|c| !c.is_plugin());
        assert!(devfile.is_flat());
    }

    #[test]
    fn yaml_output_parses_back_to_same_document() {
        let devfile = Devfile::from_yaml(NODEJS).unwrap();
        let yaml = devfile.to_yaml().unwrap();
        assert_eq!(Devfile::from_yaml(&yaml).unwrap(), devfile);
    }

    #[test]
    fn parse_error_names_format() {
        let err = Devfile::from_yaml("components: [").unwrap_err();
        assert!(matches!(err, Error::Parse { ref format, .. } if format == "YAML"));
    }

    #[test]
    fn empty_document_is_flat() {
        let devfile = Devfile::from_json("{}").unwrap();
        assert!(devfile.is_flat());
        assert_eq!(devfile.content, TemplateContent::default());
    }
}
