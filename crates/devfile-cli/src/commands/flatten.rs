//! Flatten command: resolve imports and emit the flat devfile

use std::io::Write;

use colored::Colorize;
use devfile_resolver::Resolver;

use super::read_devfile;
use crate::cli::FlattenArgs;
use crate::config::ResolverConfig;
use crate::error::{CliError, Result};

/// Run the flatten command
pub fn run_flatten(args: &FlattenArgs) -> Result<()> {
    let devfile = read_devfile(&args.file)?;

    let file_config = match &args.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    let config = file_config.merge(ResolverConfig {
        default_namespace: args.default_namespace.clone(),
        registry_url: args.registry_url.clone(),
        templates_dir: args.templates_dir.clone(),
    });
    tracing::debug!(?config, "Effective resolver config");

    let flat = Resolver::new(config.into_tools()?).resolve(&devfile)?;
    let rendered = if args.json {
        flat.to_json()?
    } else {
        flat.to_yaml()?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, with_newline(rendered)).map_err(|e| CliError::io_at(path, e))?;
            eprintln!(
                "{} Flattened {} into {}",
                "OK".green().bold(),
                args.file.display(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(with_newline(rendered).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
