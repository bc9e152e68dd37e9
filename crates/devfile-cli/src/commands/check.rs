//! Check command: report unresolved references without fetching anything

use std::path::Path;

use colored::Colorize;
use devfile_api::ImportReference;

use super::read_devfile;
use crate::error::Result;

/// Run the check command
pub fn run_check(file: &Path) -> Result<()> {
    let devfile = read_devfile(file)?;

    if devfile.is_flat() {
        println!("{} {} is flat.", "OK".green().bold(), file.display());
        return Ok(());
    }

    println!(
        "{} {} has unresolved references:",
        "IMPORTS".yellow().bold(),
        file.display()
    );
    if let Some(parent) = &devfile.parent {
        println!(
            "   {} {:<10} {}",
            "-".cyan(),
            "parent",
            describe(parent.import.as_ref())
        );
    }
    for component in &devfile.content.components {
        if let Some(plugin) = component.as_plugin() {
            println!(
                "   {} {:<10} {}",
                "-".cyan(),
                component.name,
                describe(plugin.import.as_ref())
            );
        }
    }
    println!();
    println!("Run {} to inline them.", "devfile flatten".cyan());
    Ok(())
}

fn describe(import: Option<&ImportReference>) -> String {
    import.map_or_else(|| "(no location)".to_string(), ImportReference::describe)
}
