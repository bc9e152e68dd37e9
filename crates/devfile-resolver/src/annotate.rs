//! Provenance tagging of imported elements

use devfile_api::{Attributes, IMPORT_SOURCE_ATTRIBUTE, TemplateContent};
use serde_json::Value;

/// Source id for elements contributed by the parent
pub const PARENT_SOURCE: &str = "parent";

/// Mark every component, command, project and starter project in `content`
/// as imported from `source_id`.
///
/// Repeating the call with the same `source_id` leaves `content` unchanged.
pub fn annotate_provenance(source_id: &str, content: &mut TemplateContent) {
    for component in &mut content.components {
        mark(&mut component.attributes, source_id);
    }
    for command in &mut content.commands {
        mark(&mut command.attributes, source_id);
    }
    for project in &mut content.projects {
        mark(&mut project.attributes, source_id);
    }
    for project in &mut content.starter_projects {
        mark(&mut project.attributes, source_id);
    }
}

/// The import an element came from, if it was imported at all
pub fn provenance(attributes: &Attributes) -> Option<&str> {
    attributes.get(IMPORT_SOURCE_ATTRIBUTE)?.as_str()
}

fn mark(attributes: &mut Attributes, source_id: &str) {
    attributes.insert(
        IMPORT_SOURCE_ATTRIBUTE.to_string(),
        Value::String(source_id.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use devfile_api::{Command, Component, Project, StarterProject};
    use pretty_assertions::assert_eq;

    fn content() -> TemplateContent {
        TemplateContent {
            components: vec![Component::container("server", "img")],
            commands: vec![Command::exec("run", "server", "./run")],
            projects: vec![Project::git("app", "https://example.com/app.git")],
            starter_projects: vec![StarterProject::zip("starter", "https://example.com/s.zip")],
            events: None,
        }
    }

    #[test]
    fn marks_every_element() {
        let mut content = content();
        annotate_provenance("c1", &mut content);
        assert_eq!(provenance(&content.components[0].attributes), Some("c1"));
        assert_eq!(provenance(&content.commands[0].attributes), Some("c1"));
        assert_eq!(provenance(&content.projects[0].attributes), Some("c1"));
        assert_eq!(
            provenance(&content.starter_projects[0].attributes),
            Some("c1")
        );
    }

    #[test]
    fn repeated_annotation_is_idempotent() {
        let mut once = content();
        annotate_provenance(PARENT_SOURCE, &mut once);
        let mut twice = once.clone();
        annotate_provenance(PARENT_SOURCE, &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn keeps_other_attributes() {
        let mut content = content();
        content.components[0]
            .attributes
            .insert("app.kubernetes.io/name".into(), Value::from("server"));
        annotate_provenance("c1", &mut content);
        assert_eq!(content.components[0].attributes.len(), 2);
    }

    #[test]
    fn unannotated_elements_have_no_provenance() {
        assert_eq!(provenance(&content().components[0].attributes), None);
    }
}
