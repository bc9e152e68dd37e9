//! Project and starter project definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Attributes;
use crate::error::{Error, Result, exactly_one};

/// Where a project's sources come from
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectSource {
    Git(GitSource),
    Zip(ZipSource),
    Custom(CustomSource),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSource {
    pub remotes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_from: Option<CheckoutFrom>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipSource {
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSource {
    pub project_source_class: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub embedded_resource: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git: Option<GitSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zip: Option<ZipSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom: Option<CustomSource>,
}

impl RawSource {
    fn into_source(self, kind: &str, name: &str) -> Result<ProjectSource> {
        exactly_one(
            kind,
            name,
            vec![
                self.git.map(ProjectSource::Git),
                self.zip.map(ProjectSource::Zip),
                self.custom.map(ProjectSource::Custom),
            ],
        )
    }
}

impl From<ProjectSource> for RawSource {
    fn from(source: ProjectSource) -> Self {
        match source {
            ProjectSource::Git(git) => Self {
                git: Some(git),
                ..Self::default()
            },
            ProjectSource::Zip(zip) => Self {
                zip: Some(zip),
                ..Self::default()
            },
            ProjectSource::Custom(custom) => Self {
                custom: Some(custom),
                ..Self::default()
            },
        }
    }
}

/// A project cloned into the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProject", into = "RawProject")]
pub struct Project {
    pub name: String,
    pub attributes: Attributes,
    pub clone_path: Option<String>,
    pub source: ProjectSource,
}

impl Project {
    pub fn git(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            clone_path: None,
            source: ProjectSource::Git(GitSource {
                remotes: BTreeMap::from([("origin".to_string(), origin.into())]),
                checkout_from: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clone_path: Option<String>,
    #[serde(flatten)]
    source: RawSource,
}

impl TryFrom<RawProject> for Project {
    type Error = Error;

    fn try_from(raw: RawProject) -> Result<Self> {
        let source = raw.source.into_source("project", &raw.name)?;
        Ok(Self {
            name: raw.name,
            attributes: raw.attributes,
            clone_path: raw.clone_path,
            source,
        })
    }
}

impl From<Project> for RawProject {
    fn from(project: Project) -> Self {
        Self {
            name: project.name,
            attributes: project.attributes,
            clone_path: project.clone_path,
            source: project.source.into(),
        }
    }
}

/// A project offered as a starting point for new workspaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStarterProject", into = "RawStarterProject")]
pub struct StarterProject {
    pub name: String,
    pub attributes: Attributes,
    pub description: Option<String>,
    pub sub_dir: Option<String>,
    pub source: ProjectSource,
}

impl StarterProject {
    pub fn zip(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            description: None,
            sub_dir: None,
            source: ProjectSource::Zip(ZipSource {
                location: location.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStarterProject {
    name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_dir: Option<String>,
    #[serde(flatten)]
    source: RawSource,
}

impl TryFrom<RawStarterProject> for StarterProject {
    type Error = Error;

    fn try_from(raw: RawStarterProject) -> Result<Self> {
        let source = raw.source.into_source("starter project", &raw.name)?;
        Ok(Self {
            name: raw.name,
            attributes: raw.attributes,
            description: raw.description,
            sub_dir: raw.sub_dir,
            source,
        })
    }
}

impl From<StarterProject> for RawStarterProject {
    fn from(project: StarterProject) -> Self {
        Self {
            name: project.name,
            attributes: project.attributes,
            description: project.description,
            sub_dir: project.sub_dir,
            source: project.source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_project_from_yaml() {
        let yaml = r#"
name: web
clonePath: src/web
git:
  remotes:
    origin: https://github.com/example/web.git
  checkoutFrom:
    revision: main
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.clone_path.as_deref(), Some("src/web"));
        let ProjectSource::Git(git) = project.source else {
            panic!("expected git source");
        };
        assert_eq!(git.remotes["origin"], "https://github.com/example/web.git");
        assert_eq!(git.checkout_from.unwrap().revision.as_deref(), Some("main"));
    }

    #[test]
    fn starter_project_with_two_sources_is_rejected() {
        let yaml = r#"
name: starter
zip:
  location: https://example.com/a.zip
git:
  remotes:
    origin: https://example.com/a.git
"#;
        let err = serde_yaml::from_str::<StarterProject>(yaml).unwrap_err();
        assert!(err.to_string().contains("starter project 'starter' defines 2 types"));
    }
}
