//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Devfile flattener - inline parent and plugin imports into one devfile
#[derive(Parser, Debug)]
#[command(name = "devfile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve every parent and plugin reference and print the flat devfile
    ///
    /// Examples:
    ///   devfile flatten devfile.yaml
    ///   devfile flatten devfile.yaml -o flat.yaml --registry-url https://registry.devfile.io
    ///   devfile flatten devfile.yaml --templates-dir ./templates --default-namespace dev
    Flatten(FlattenArgs),

    /// Report whether a devfile is flat and list its references
    Check {
        /// Devfile to inspect
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FlattenArgs {
    /// Devfile to flatten (YAML or JSON)
    pub file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Namespace for Kubernetes references that do not name one
    #[arg(long, env = "DEVFILE_DEFAULT_NAMESPACE")]
    pub default_namespace: Option<String>,

    /// Registry for id references that do not name one
    #[arg(long, env = "DEVFILE_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Directory laid out as <namespace>/<name>.yaml serving Kubernetes templates
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// TOML file with resolver defaults; flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flatten_with_flags() {
        let cli = Cli::try_parse_from([
            "devfile",
            "flatten",
            "devfile.yaml",
            "-o",
            "out.yaml",
            "--json",
            "--registry-url",
            "https://r",
        ])
        .unwrap();
        let Commands::Flatten(args) = cli.command else {
            panic!("expected flatten");
        };
        assert_eq!(args.file, PathBuf::from("devfile.yaml"));
        assert_eq!(args.output, Some(PathBuf::from("out.yaml")));
        assert!(args.json);
        assert_eq!(args.registry_url.as_deref(), Some("https://r"));
        assert!(args.templates_dir.is_none());
    }

    #[test]
    fn parse_check_with_global_verbose() {
        let cli = Cli::try_parse_from(["devfile", "check", "devfile.yaml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Check {
                file: PathBuf::from("devfile.yaml")
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["devfile"]).is_err());
    }
}
