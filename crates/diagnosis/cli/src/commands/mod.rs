//! Command implementations

pub mod diagnose;
pub mod levels;
pub mod sessions;
pub mod validate;

use std::path::PathBuf;

use diagnosis_catalog::FileCatalog;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Open the catalog named on the command line, falling back to configuration.
pub(crate) fn open_catalog(arg: Option<PathBuf>, config: &CliConfig) -> CliResult<FileCatalog> {
    let path = arg
        .or_else(|| config.catalog.clone())
        .ok_or(CliError::MissingCatalog)?;
    Ok(FileCatalog::new(path)?)
}
