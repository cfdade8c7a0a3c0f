//! Command implementations.

mod info;
mod serve;
mod validate;

pub use info::run_info;
pub use serve::run_serve;
pub use validate::run_validate;

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Use the explicit path, or the first config found in the standard locations
fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(CliError::config_missing(path.display().to_string())),
        None => config_loader::ConfigLoader::discover().ok_or_else(|| {
            CliError::config_not_found(&config_loader::ConfigLoader::search_paths())
        }),
    }
}
