//! Applying override directives to resolved template content

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use devfile_api::{Overrides, TemplateContent};

use crate::ElementKind;
use crate::error::{Error, Result};
use crate::patch::{merge_patch, replace_union_member};

const COMPONENT_MEMBERS: &[&str] = &[
    "container",
    "volume",
    "kubernetes",
    "openshift",
    "image",
    "plugin",
];
const COMMAND_MEMBERS: &[&str] = &["exec", "apply", "composite"];
const SOURCE_MEMBERS: &[&str] = &["git", "zip", "custom"];

/// Patch `base` with every override list in `overrides`
pub fn apply_overrides(base: TemplateContent, overrides: &Overrides) -> Result<TemplateContent> {
    let TemplateContent {
        components,
        commands,
        projects,
        starter_projects,
        events,
    } = base;

    Ok(TemplateContent {
        components: override_list(
            ElementKind::Component,
            components,
            &overrides.components,
            COMPONENT_MEMBERS,
        )?,
        commands: override_list(
            ElementKind::Command,
            commands,
            &overrides.commands,
            COMMAND_MEMBERS,
        )?,
        projects: override_list(
            ElementKind::Project,
            projects,
            &overrides.projects,
            SOURCE_MEMBERS,
        )?,
        starter_projects: override_list(
            ElementKind::StarterProject,
            starter_projects,
            &overrides.starter_projects,
            SOURCE_MEMBERS,
        )?,
        events,
    })
}

fn override_list<T>(
    kind: ElementKind,
    base: Vec<T>,
    patches: &[Value],
    members: &[&str],
) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    if patches.is_empty() {
        return Ok(base);
    }

    let key_field = kind.key_field();
    let mut keyed_patches: Vec<(&str, &Value)> = Vec::with_capacity(patches.len());
    for patch in patches {
        let key = patch
            .as_object()
            .and_then(|obj| obj.get(key_field))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::invalid_override(kind, "<unnamed>", format!("entry has no '{key_field}'"))
            })?;
        keyed_patches.push((key, patch));
    }

    let mut values = base
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<Value>, _>>()?;

    let unmatched: Vec<String> = keyed_patches
        .iter()
        .filter(|(key, _)| !values.iter().any(|v| element_key(v, key_field) == Some(*key)))
        .map(|(key, _)| key.to_string())
        .collect();
    if !unmatched.is_empty() {
        return Err(Error::UnmatchedOverride {
            kind,
            keys: unmatched,
        });
    }

    for (key, patch) in &keyed_patches {
        tracing::debug!(%kind, key, "Applying override");
        if let Some(target) = values
            .iter_mut()
            .find(|v| element_key(v, key_field) == Some(*key))
        {
            replace_union_member(target, patch, members);
            merge_patch(target, patch);
        }
    }

    values
        .into_iter()
        .map(|value| {
            let key = element_key(&value, key_field).unwrap_or_default().to_string();
            serde_json::from_value(value)
                .map_err(|e| Error::invalid_override(kind, key, e.to_string()))
        })
        .collect()
}

fn element_key<'a>(value: &'a Value, key_field: &str) -> Option<&'a str> {
    value.get(key_field)?.as_str()
}
