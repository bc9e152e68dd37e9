//! The flattening engine
//!
//! [`Resolver::resolve`] turns a devfile that references a parent and/or
//! plugins into one self-contained document:
//!
//! 1. an already flat devfile is returned as a copy, touching no collaborator
//! 2. the parent is fetched, must be flat itself, gets its overrides applied
//!    and every element tagged with provenance `"parent"`
//! 3. non-plugin components, commands, projects, starter projects and events
//!    of the current level form the local content
//! 4. each plugin is pushed onto the resolution context, checked for cycles,
//!    fetched, flattened recursively (its own parent and plugins included),
//!    overridden and tagged with its component name
//! 5. the merger combines local, parent and plugin content
//!
//! Plugins are processed depth-first, one at a time, in declaration order.
//! The first error aborts the whole call.

use devfile_api::{
    ComponentKind, Devfile, ImportReference, Parent, PluginComponent, TemplateContent,
};
use devfile_merge::{DefaultMerger, Merger};

use crate::annotate::{PARENT_SOURCE, annotate_provenance};
use crate::context::{NodeId, ResolutionContext};
use crate::error::{Error, Result};
use crate::reference::{fetch_reference, with_defaults};
use crate::tools::ResolverTools;

/// Flattens devfiles using the configured fetch capabilities and merger
#[derive(Debug, Clone)]
pub struct Resolver<M = DefaultMerger> {
    tools: ResolverTools,
    merger: M,
}

impl Resolver<DefaultMerger> {
    /// Create a resolver with the standard devfile merge semantics
    pub fn new(tools: ResolverTools) -> Self {
        Self::with_merger(tools, DefaultMerger::new())
    }
}

impl<M: Merger> Resolver<M> {
    /// Create a resolver that composes content with `merger`
    pub fn with_merger(tools: ResolverTools, merger: M) -> Self {
        Self { tools, merger }
    }

    /// Defaults and clients used for fetching imports
    pub fn tools(&self) -> &ResolverTools {
        &self.tools
    }

    /// Resolve every parent and plugin reference in `devfile`.
    ///
    /// `devfile` is never modified; the flattened document is a new value.
    ///
    /// # Errors
    ///
    /// Any fetch, configuration, structural, cycle or merge failure aborts
    /// the resolution and is returned as is.
    pub fn resolve(&self, devfile: &Devfile) -> Result<Devfile> {
        let mut context = ResolutionContext::new();
        let root = context.root();
        self.resolve_level(devfile, &mut context, root)
    }

    fn resolve_level(
        &self,
        devfile: &Devfile,
        context: &mut ResolutionContext,
        node: NodeId,
    ) -> Result<Devfile> {
        if devfile.is_flat() {
            return Ok(devfile.clone());
        }
        tracing::debug!(
            level = %context.component_name(node),
            depth = context.depth(node),
            "Flattening devfile"
        );

        let parent_content = devfile
            .parent
            .as_ref()
            .map(|parent| self.resolve_parent(parent))
            .transpose()?;

        let mut local = TemplateContent {
            components: Vec::new(),
            commands: devfile.content.commands.clone(),
            projects: devfile.content.projects.clone(),
            starter_projects: devfile.content.starter_projects.clone(),
            events: devfile.content.events.clone(),
        };
        let mut plugin_contents = Vec::new();
        for component in &devfile.content.components {
            match &component.kind {
                ComponentKind::Plugin(plugin) => {
                    let content = self.resolve_plugin(&component.name, plugin, context, node)?;
                    plugin_contents.push(content);
                }
                _ => local.components.push(component.clone()),
            }
        }

        let merged = self.merger.merge(local, parent_content, plugin_contents)?;
        Ok(Devfile {
            schema_version: devfile.schema_version.clone(),
            metadata: devfile.metadata.clone(),
            parent: None,
            content: merged,
        })
    }

    fn resolve_parent(&self, parent: &Parent) -> Result<TemplateContent> {
        let reference = import_of(PARENT_SOURCE, parent.import.as_ref())?;
        let fetched = fetch_reference(PARENT_SOURCE, reference, &self.tools)?;

        if fetched.parent.is_some() {
            return Err(Error::structural(
                PARENT_SOURCE,
                "parents that declare a parent are not supported",
            ));
        }
        if fetched.content.has_plugins() {
            return Err(Error::structural(
                PARENT_SOURCE,
                format!(
                    "parents containing plugins are not supported (found {})",
                    fetched.content.plugin_names().join(", ")
                ),
            ));
        }

        let mut content = fetched.content;
        if !parent.overrides.is_empty() {
            tracing::debug!("Applying parent overrides");
            content = self.merger.override_content(content, &parent.overrides)?;
        }
        annotate_provenance(PARENT_SOURCE, &mut content);
        Ok(content)
    }

    fn resolve_plugin(
        &self,
        name: &str,
        plugin: &PluginComponent,
        context: &mut ResolutionContext,
        node: NodeId,
    ) -> Result<TemplateContent> {
        let reference = with_defaults(import_of(name, plugin.import.as_ref())?, &self.tools);
        let child = context.add_plugin(node, name, reference.clone());
        context.has_cycle(child)?;

        let fetched = fetch_reference(name, &reference, &self.tools)?;
        let mut content = self.resolve_level(&fetched, context, child)?.content;
        if !plugin.overrides.is_empty() {
            tracing::debug!(plugin = name, "Applying plugin overrides");
            content = self
                .merger
                .override_content(content, &plugin.overrides.clone().into())?;
        }
        annotate_provenance(name, &mut content);
        Ok(content)
    }
}

fn import_of<'a>(
    component: &str,
    import: Option<&'a ImportReference>,
) -> Result<&'a ImportReference> {
    import.ok_or_else(|| Error::Reference {
        component: component.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, HttpClient};
    use devfile_api::{Component, IMPORT_SOURCE_ATTRIBUTE};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves fixed documents by URL
    struct StaticHttp(HashMap<String, Devfile>);

    impl HttpClient for StaticHttp {
        fn fetch_template(&self, url: &str) -> std::result::Result<Devfile, ClientError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(url.to_string()))
        }
    }

    fn tools_serving(documents: &[(&str, Devfile)]) -> ResolverTools {
        let map = documents
            .iter()
            .map(|(url, doc)| (url.to_string(), doc.clone()))
            .collect();
        ResolverTools::new()
            .with_default_registry_url("https://reg")
            .with_http_client(Arc::new(StaticHttp(map)))
    }

    fn with_components(components: Vec<Component>) -> Devfile {
        Devfile::new(TemplateContent {
            components,
            ..TemplateContent::default()
        })
    }

    #[test]
    fn flat_devfile_is_copied() {
        let devfile = with_components(vec![Component::container("a", "img")]);
        let resolver = Resolver::new(ResolverTools::new());
        assert_eq!(resolver.resolve(&devfile).unwrap(), devfile);
    }

    #[test]
    fn with_merger_keeps_tools() {
        let tools = ResolverTools::new().with_default_namespace("ns1");
        let resolver = Resolver::with_merger(tools, DefaultMerger::new());
        assert_eq!(resolver.tools().default_namespace(), Some("ns1"));
        assert!(resolver.tools().http_client().is_none());
    }

    #[test]
    fn registry_plugin_is_inlined_with_provenance() {
        let tools = tools_serving(&[(
            "https://reg/plugin1",
            with_components(vec![Component::container("server", "img")]),
        )]);
        let devfile = with_components(vec![Component::plugin(
            "c1",
            PluginComponent::new(ImportReference::id("plugin1", None)),
        )]);

        let flat = Resolver::new(tools).resolve(&devfile).unwrap();
        assert!(flat.is_flat());
        assert_eq!(flat.content.components.len(), 1);
        assert_eq!(flat.content.components[0].name, "server");
        assert_eq!(
            flat.content.components[0].attributes[IMPORT_SOURCE_ATTRIBUTE],
            "c1"
        );
    }

    #[test]
    fn missing_plugin_is_not_found() {
        let tools = tools_serving(&[]);
        let devfile = with_components(vec![Component::plugin(
            "c1",
            PluginComponent::new(ImportReference::id("plugin1", None)),
        )]);
        let err = Resolver::new(tools).resolve(&devfile).unwrap_err();
        assert!(matches!(err, Error::NotFound { ref component, .. } if component == "c1"));
    }

    #[test]
    fn plugin_without_location_is_a_reference_error() {
        let devfile = with_components(vec![Component::plugin("c1", PluginComponent::default())]);
        let err = Resolver::new(ResolverTools::new())
            .resolve(&devfile)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "import reference of 'c1' does not define any resources"
        );
    }
}
