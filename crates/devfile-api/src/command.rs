//! Command definitions

use serde::{Deserialize, Serialize};

use crate::Attributes;
use crate::component::EnvVar;
use crate::error::{Error, Result, exactly_one};

/// A command identified by `id`, carrying exactly one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCommand", into = "RawCommand")]
pub struct Command {
    pub id: String,
    pub attributes: Attributes,
    pub kind: CommandKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Exec(ExecCommand),
    Apply(ApplyCommand),
    Composite(CompositeCommand),
}

impl Command {
    pub fn exec(
        id: impl Into<String>,
        component: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
            kind: CommandKind::Exec(ExecCommand {
                component: component.into(),
                command_line: command_line.into(),
                ..ExecCommand::default()
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandGroup {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCommand {
    pub command_line: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_reload_capable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCommand {
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCommand {
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCommand {
    id: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exec: Option<ExecCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    apply: Option<ApplyCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    composite: Option<CompositeCommand>,
}

impl TryFrom<RawCommand> for Command {
    type Error = Error;

    fn try_from(raw: RawCommand) -> Result<Self> {
        let kind = exactly_one(
            "command",
            &raw.id,
            vec![
                raw.exec.map(CommandKind::Exec),
                raw.apply.map(CommandKind::Apply),
                raw.composite.map(CommandKind::Composite),
            ],
        )?;
        Ok(Self {
            id: raw.id,
            attributes: raw.attributes,
            kind,
        })
    }
}

impl From<Command> for RawCommand {
    fn from(command: Command) -> Self {
        let (exec, apply, composite) = match command.kind {
            CommandKind::Exec(e) => (Some(e), None, None),
            CommandKind::Apply(a) => (None, Some(a), None),
            CommandKind::Composite(c) => (None, None, Some(c)),
        };
        Self {
            id: command.id,
            attributes: command.attributes,
            exec,
            apply,
            composite,
        }
    }
}
