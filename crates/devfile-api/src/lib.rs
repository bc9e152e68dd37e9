//! Devfile template document model.
//!
//! This crate provides the typed representation of a devfile: components,
//! commands, projects, starter projects, events, and the import references
//! (`parent` and `plugin`) that point at other templates.
//!
//! Tagged unions on the wire (a component carries one of `container`,
//! `volume`, ...; an import carries one of `kubernetes`, `uri`, `id`) are
//! decoded into Rust enums, and documents populating several members are
//! rejected at parse time.

pub mod command;
pub mod component;
pub mod devfile;
pub mod error;
pub mod import;
pub mod project;

use std::collections::BTreeMap;

/// Free-form attributes attached to components, commands and projects
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Attribute recording which import contributed an element to a flattened devfile.
///
/// Its value is `"parent"` for parent content, or the plugin component's name.
pub const IMPORT_SOURCE_ATTRIBUTE: &str = "api.devfile.io/imported-from";

pub use command::{Command, CommandKind};
pub use component::{Component, ComponentKind, ContainerComponent};
pub use devfile::{Devfile, Events, Metadata, TemplateContent};
pub use error::{Error, Result};
pub use import::{
    ImportReference, KubernetesReference, Overrides, Parent, PluginComponent, PluginOverrides,
};
pub use project::{Project, ProjectSource, StarterProject};
