//! Composition of local, parent and plugin content into one template

use std::collections::HashMap;

use devfile_api::{Attributes, Events, IMPORT_SOURCE_ATTRIBUTE, TemplateContent};

use crate::ElementKind;
use crate::error::{Error, Result};

/// Label of one contributing source, used in duplicate-key errors
struct Source<'a> {
    label: String,
    content: &'a TemplateContent,
}

/// Merge in order parent, plugins, local. Keys must be unique across all sources.
pub fn merge_contents(
    local: TemplateContent,
    parent: Option<TemplateContent>,
    plugins: Vec<TemplateContent>,
) -> Result<TemplateContent> {
    let mut sources: Vec<Source<'_>> = Vec::with_capacity(plugins.len() + 2);
    if let Some(parent) = parent.as_ref() {
        sources.push(Source {
            label: "parent".to_string(),
            content: parent,
        });
    }
    for (index, plugin) in plugins.iter().enumerate() {
        sources.push(Source {
            label: plugin_label(plugin, index),
            content: plugin,
        });
    }
    sources.push(Source {
        label: "main devfile".to_string(),
        content: &local,
    });

    check_unique(&sources, ElementKind::Component, |c| {
        c.components.iter().map(|e| e.name.as_str()).collect()
    })?;
    check_unique(&sources, ElementKind::Command, |c| {
        c.commands.iter().map(|e| e.id.as_str()).collect()
    })?;
    check_unique(&sources, ElementKind::Project, |c| {
        c.projects.iter().map(|e| e.name.as_str()).collect()
    })?;
    check_unique(&sources, ElementKind::StarterProject, |c| {
        c.starter_projects.iter().map(|e| e.name.as_str()).collect()
    })?;

    let mut merged = TemplateContent::default();
    let mut events = Events::default();
    for source in &sources {
        let content = source.content;
        merged.components.extend(content.components.iter().cloned());
        merged.commands.extend(content.commands.iter().cloned());
        merged.projects.extend(content.projects.iter().cloned());
        merged
            .starter_projects
            .extend(content.starter_projects.iter().cloned());
        if let Some(source_events) = &content.events {
            append_unique(&mut events.pre_start, &source_events.pre_start);
            append_unique(&mut events.post_start, &source_events.post_start);
            append_unique(&mut events.pre_stop, &source_events.pre_stop);
            append_unique(&mut events.post_stop, &source_events.post_stop);
        }
    }
    merged.events = (!events.is_empty()).then_some(events);

    tracing::debug!(
        sources = sources.len(),
        components = merged.components.len(),
        commands = merged.commands.len(),
        "Merged template content"
    );
    Ok(merged)
}

fn plugin_label(plugin: &TemplateContent, index: usize) -> String {
    plugin
        .components
        .iter()
        .map(|c| &c.attributes)
        .chain(plugin.commands.iter().map(|c| &c.attributes))
        .find_map(import_source)
        .map(|name| format!("plugin '{name}'"))
        .unwrap_or_else(|| format!("plugin #{}", index + 1))
}

fn import_source(attributes: &Attributes) -> Option<&str> {
    attributes.get(IMPORT_SOURCE_ATTRIBUTE)?.as_str()
}

fn check_unique<'a>(
    sources: &[Source<'a>],
    kind: ElementKind,
    keys_of: impl Fn(&'a TemplateContent) -> Vec<&'a str>,
) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for source in sources {
        for key in keys_of(source.content) {
            if let Some(first) = seen.insert(key, source.label.as_str()) {
                return Err(Error::DuplicateKey {
                    kind,
                    key: key.to_string(),
                    first: first.to_string(),
                    second: source.label.clone(),
                });
            }
        }
    }
    Ok(())
}

fn append_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devfile_api::{Command, Component, StarterProject};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(content: &TemplateContent) -> Vec<&str> {
        content.components.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn orders_parent_then_plugins_then_local() {
        let local = TemplateContent {
            components: vec![Component::container("local", "a")],
            ..TemplateContent::default()
        };
        let parent = TemplateContent {
            components: vec![Component::container("from-parent", "b")],
            ..TemplateContent::default()
        };
        let plugin = TemplateContent {
            components: vec![Component::volume("from-plugin")],
            ..TemplateContent::default()
        };
        let merged = merge_contents(local, Some(parent), vec![plugin]).unwrap();
        assert_eq!(names(&merged), vec!["from-parent", "from-plugin", "local"]);
    }

    #[test]
    fn duplicate_between_parent_and_local_is_rejected() {
        let local = TemplateContent {
            commands: vec![Command::exec("run", "x", "a")],
            ..TemplateContent::default()
        };
        let parent = local.clone();
        let err = merge_contents(local, Some(parent), vec![]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate command 'run': defined in parent and in main devfile"
        );
    }

    #[test]
    fn duplicate_label_uses_plugin_provenance() {
        let mut component = Component::volume("shared");
        component
            .attributes
            .insert(IMPORT_SOURCE_ATTRIBUTE.to_string(), json!("tools"));
        let plugin = TemplateContent {
            components: vec![component.clone()],
            ..TemplateContent::default()
        };
        let local = TemplateContent {
            components: vec![Component::volume("shared")],
            ..TemplateContent::default()
        };
        let err = merge_contents(local, None, vec![plugin]).unwrap_err();
        assert!(err.to_string().contains("defined in plugin 'tools'"));
    }

    #[test]
    fn events_concatenate_without_repeats() {
        let parent = TemplateContent {
            events: Some(Events {
                post_start: vec!["init".into()],
                ..Events::default()
            }),
            ..TemplateContent::default()
        };
        let local = TemplateContent {
            events: Some(Events {
                post_start: vec!["init".into(), "run".into()],
                ..Events::default()
            }),
            ..TemplateContent::default()
        };
        let merged = merge_contents(local, Some(parent), vec![]).unwrap();
        assert_eq!(merged.events.unwrap().post_start, vec!["init", "run"]);
    }

    #[test]
    fn no_events_stays_none() {
        let local = TemplateContent {
            starter_projects: vec![StarterProject::zip("s", "https://example.com/s.zip")],
            ..TemplateContent::default()
        };
        let merged = merge_contents(local, None, vec![]).unwrap();
        assert!(merged.events.is_none());
        assert_eq!(merged.starter_projects.len(), 1);
    }
}
