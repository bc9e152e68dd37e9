//! Resolver defaults loaded from TOML and command-line flags
//!
//! ```toml
//! default_namespace = "dev"
//! registry_url = "https://registry.devfile.io"
//! templates_dir = "./templates"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use devfile_resolver::{DirectoryKubeClient, HttpTemplateClient, ResolverTools};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Everything needed to build [`ResolverTools`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub default_namespace: Option<String>,
    pub registry_url: Option<String>,
    pub templates_dir: Option<PathBuf>,
}

impl ResolverConfig {
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a config file. A relative `templates_dir` is taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config = Self::parse(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        if let Some(dir) = config.templates_dir.take() {
            config.templates_dir = Some(match path.parent() {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir,
            });
        }
        tracing::debug!(?path, ?config, "Loaded resolver config");
        Ok(config)
    }

    /// Layer `overrides` on top of `self`; set values in `overrides` win
    pub fn merge(self, overrides: ResolverConfig) -> Self {
        Self {
            default_namespace: overrides.default_namespace.or(self.default_namespace),
            registry_url: overrides.registry_url.or(self.registry_url),
            templates_dir: overrides.templates_dir.or(self.templates_dir),
        }
    }

    /// Build resolver tools: HTTP is always available, Kubernetes only with
    /// a templates directory
    pub fn into_tools(self) -> Result<ResolverTools> {
        let http = HttpTemplateClient::new()
            .map_err(|e| CliError::user(format!("cannot create HTTP client: {e}")))?;
        let mut tools = ResolverTools::new().with_http_client(Arc::new(http));

        if let Some(namespace) = self.default_namespace {
            tools = tools.with_default_namespace(namespace);
        }
        if let Some(url) = self.registry_url {
            tools = tools.with_default_registry_url(url);
        }
        if let Some(dir) = self.templates_dir {
            if !dir.is_dir() {
                tracing::warn!(?dir, "Templates directory does not exist");
            }
            tools = tools.with_kube_client(Arc::new(DirectoryKubeClient::new(dir)));
        }
        Ok(tools)
    }
}
