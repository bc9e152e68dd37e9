//! Merge and override composition for devfile template content.
//!
//! The flattening engine hands every resolved branch to a [`Merger`]:
//! overrides are applied per branch with [`Merger::override_content`], and
//! the final document is assembled with [`Merger::merge`].
//! [`DefaultMerger`] implements the usual devfile semantics:
//!
//! - keys (component, project and starter project names, command ids) must be
//!   unique across the main devfile, the parent and every plugin
//! - merged order is parent, plugins in declaration order, then main devfile
//! - override entries patch existing elements by key and may not introduce
//!   new ones

pub mod error;
pub mod merge;
pub mod overrides;
pub mod patch;

use std::fmt;

use devfile_api::{Overrides, TemplateContent};

pub use error::{Error, Result};

/// The element lists a template carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Component,
    Command,
    Project,
    StarterProject,
}

impl ElementKind {
    /// Field identifying an element of this kind
    pub fn key_field(self) -> &'static str {
        match self {
            Self::Command => "id",
            _ => "name",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Component => "component",
            Self::Command => "command",
            Self::Project => "project",
            Self::StarterProject => "starter project",
        };
        f.write_str(label)
    }
}

/// Composes resolved template content
pub trait Merger {
    /// Combine the main devfile's content with its parent and plugin contents
    fn merge(
        &self,
        local: TemplateContent,
        parent: Option<TemplateContent>,
        plugins: Vec<TemplateContent>,
    ) -> Result<TemplateContent>;

    /// Patch one resolved branch with its override directives
    fn override_content(
        &self,
        base: TemplateContent,
        overrides: &Overrides,
    ) -> Result<TemplateContent>;
}

/// Standard devfile merge semantics
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMerger;

impl DefaultMerger {
    pub fn new() -> Self {
        Self
    }
}

impl Merger for DefaultMerger {
    fn merge(
        &self,
        local: TemplateContent,
        parent: Option<TemplateContent>,
        plugins: Vec<TemplateContent>,
    ) -> Result<TemplateContent> {
        merge::merge_contents(local, parent, plugins)
    }

    fn override_content(
        &self,
        base: TemplateContent,
        overrides: &Overrides,
    ) -> Result<TemplateContent> {
        overrides::apply_overrides(base, overrides)
    }
}
