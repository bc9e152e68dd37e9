//! File-backed Kubernetes template store
//!
//! Mirrors a cluster's templates on disk as `<root>/<namespace>/<name>.yaml`.
//! A file may hold either a plain devfile or a `DevWorkspaceTemplate`
//! resource, in which case its `spec` is used.

use std::path::{Path, PathBuf};

use devfile_api::Devfile;
use serde_yaml::Value;

use crate::client::{ClientError, KubeClient};

const TEMPLATE_KIND: &str = "DevWorkspaceTemplate";

#[derive(Debug, Clone)]
pub struct DirectoryKubeClient {
    root: PathBuf,
}

impl DirectoryKubeClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `namespace/name`
    pub fn template_path(&self, name: &str, namespace: &str) -> PathBuf {
        self.root.join(namespace).join(format!("{name}.yaml"))
    }
}

impl KubeClient for DirectoryKubeClient {
    fn get(&self, name: &str, namespace: &str) -> Result<Devfile, ClientError> {
        let path = self.template_path(name, namespace);
        tracing::debug!(?path, "Reading Kubernetes template");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClientError::NotFound(format!("{namespace}/{name}")));
            }
            Err(e) => {
                return Err(ClientError::other(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let document: Value = serde_yaml::from_str(&content)
            .map_err(|e| ClientError::other(format!("invalid YAML in {}: {e}", path.display())))?;
        let is_template = document.get("kind").and_then(Value::as_str) == Some(TEMPLATE_KIND);
        let body = if is_template {
            match document.get("spec").cloned() {
                Some(spec) => spec,
                None => {
                    tracing::warn!(?path, "{TEMPLATE_KIND} has no spec, reading it as a devfile");
                    document
                }
            }
        } else {
            document
        };
        serde_yaml::from_value(body)
            .map_err(|e| ClientError::other(format!("invalid template in {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, namespace: &str, name: &str, content: &str) {
        let dir = root.join(namespace);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{name}.yaml")), content).unwrap();
    }

    #[test]
    fn reads_plain_devfile() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "ns1",
            "web",
            "components:\n  - name: web\n    container:\n      image: nginx\n",
        );
        let client = DirectoryKubeClient::new(temp.path());
        let devfile = client.get("web", "ns1").unwrap();
        assert_eq!(devfile.content.components[0].name, "web");
    }

    #[test]
    fn unwraps_devworkspace_template_spec() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "ns1",
            "tools",
            r#"
apiVersion: workspace.devfile.io/v1alpha2
kind: DevWorkspaceTemplate
metadata:
  name: tools
spec:
  components:
    - name: tools
      container:
        image: quay.io/tools
"#,
        );
        let devfile = DirectoryKubeClient::new(temp.path())
            .get("tools", "ns1")
            .unwrap();
        assert_eq!(devfile.content.components.len(), 1);
        assert!(devfile.metadata.is_none());
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryKubeClient::new(temp.path())
            .get("absent", "ns1")
            .unwrap_err();
        assert_eq!(err, ClientError::NotFound("ns1/absent".to_string()));
    }

    #[test]
    fn malformed_file_is_other() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "ns1", "bad", "components: [");
        let err = DirectoryKubeClient::new(temp.path())
            .get("bad", "ns1")
            .unwrap_err();
        assert!(!err.is_not_found());
    }
}
