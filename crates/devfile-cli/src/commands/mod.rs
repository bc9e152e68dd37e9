//! Command implementations for devfile-cli

pub mod check;
pub mod flatten;

pub use check::run_check;
pub use flatten::run_flatten;

use std::path::Path;

use devfile_api::Devfile;

use crate::error::{CliError, Result};

/// Read a devfile, choosing JSON for `.json` files and YAML otherwise
pub(crate) fn read_devfile(path: &Path) -> Result<Devfile> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io_at(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let devfile = if is_json {
        Devfile::from_json(&content)?
    } else {
        Devfile::from_yaml(&content)?
    };
    Ok(devfile)
}
