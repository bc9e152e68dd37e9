//! Recursive parent and plugin resolution that flattens devfiles.
//!
//! A devfile may reference a parent template and any number of plugin
//! templates, each located in a Kubernetes cluster, at a URI, or by id in a
//! devfile registry. [`Resolver`] fetches them through injected clients,
//! flattens nested plugins, guards against import cycles, tags every
//! imported element with its provenance, and merges everything into one
//! self-contained devfile.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use devfile_api::Devfile;
//! use devfile_resolver::{HttpTemplateClient, Resolver, ResolverTools};
//!
//! let devfile = Devfile::from_yaml(r#"
//! schemaVersion: 2.2.0
//! parent:
//!   id: nodejs
//! "#)?;
//!
//! let tools = ResolverTools::new()
//!     .with_default_registry_url("https://registry.devfile.io/devfiles")
//!     .with_http_client(Arc::new(HttpTemplateClient::new()?));
//!
//! let flat = Resolver::new(tools).resolve(&devfile)?;
//! assert!(flat.is_flat());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod annotate;
pub mod client;
pub mod context;
pub mod error;
pub mod http;
pub mod kube;
pub mod reference;
pub mod resolver;
pub mod tools;

pub use annotate::{PARENT_SOURCE, annotate_provenance, provenance};
pub use client::{ClientError, HttpClient, KubeClient};
pub use context::{NodeId, ResolutionContext};
pub use error::{Error, Result};
pub use http::HttpTemplateClient;
pub use kube::DirectoryKubeClient;
pub use resolver::Resolver;
pub use tools::ResolverTools;
