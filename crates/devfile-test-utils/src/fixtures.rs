//! Terse constructors for test documents

use devfile_api::{Component, Devfile, ImportReference, PluginComponent, TemplateContent};

/// A flat devfile with one container component per name
pub fn containers(names: &[&str]) -> Devfile {
    Devfile::new(TemplateContent {
        components: names
            .iter()
            .map(|name| Component::container(*name, format!("quay.io/test/{name}")))
            .collect(),
        ..TemplateContent::default()
    })
}

/// A devfile holding exactly the given components
pub fn with_components(components: Vec<Component>) -> Devfile {
    Devfile::new(TemplateContent {
        components,
        ..TemplateContent::default()
    })
}

/// A plugin component importing `reference`
pub fn plugin(name: &str, reference: ImportReference) -> Component {
    Component::plugin(name, PluginComponent::new(reference))
}

/// A plugin component importing registry id `id` from the default registry
pub fn registry_plugin(name: &str, id: &str) -> Component {
    plugin(name, ImportReference::id(id, None))
}

/// Parse YAML, panicking with the parse error on failure
pub fn yaml(source: &str) -> Devfile {
    Devfile::from_yaml(source).unwrap_or_else(|e| panic!("fixtures::yaml: {e}"))
}
