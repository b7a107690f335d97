//! `cfdx validate`

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use diagnosis_catalog::CatalogProvider;
use diagnosis_types::DataIntegrityWarning;

use super::open_catalog;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{print_json, print_success, print_warning, OutputFormat};

/// Arguments for `cfdx validate`
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Catalog file (.json or .toml)
    #[arg(short, long, env = "CFDX_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct IntegrityReport<'a> {
    symptoms: usize,
    damages: usize,
    rules: usize,
    consistent: bool,
    warnings: &'a [DataIntegrityWarning],
}

/// Execute `cfdx validate`; fails when the catalog has any integrity issue
pub async fn execute(args: ValidateArgs, config: &CliConfig) -> CliResult<()> {
    let catalog = open_catalog(args.catalog, config)?;
    let snapshot = catalog.snapshot().await?;
    let warnings = snapshot.warnings();

    match args.format {
        OutputFormat::Json => print_json(&IntegrityReport {
            symptoms: snapshot.symptoms().len(),
            damages: snapshot.damages().len(),
            rules: snapshot.rules().len(),
            consistent: snapshot.is_consistent(),
            warnings,
        })?,
        OutputFormat::Table => {
            let counts = format!(
                "{} symptoms, {} damages, {} rules",
                snapshot.symptoms().len(),
                snapshot.damages().len(),
                snapshot.rules().len()
            );
            if snapshot.is_consistent() {
                print_success(&format!("{} is consistent: {counts}", catalog.path().display()));
            } else {
                println!("{}: {counts}", catalog.path().display());
                for warning in warnings {
                    print_warning(&warning.to_string());
                }
            }
        }
    }

    if warnings.is_empty() {
        Ok(())
    } else {
        Err(CliError::Integrity(warnings.len()))
    }
}
