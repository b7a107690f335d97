//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;
use diagnosis_engine::ConfidenceColor;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print rows as a table
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Print any value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Colour text by confidence tier
pub fn colorize(text: &str, color: ConfidenceColor) -> ColoredString {
    match color {
        ConfidenceColor::Tier1 => text.green(),
        ConfidenceColor::Tier2 => text.yellow(),
        ConfidenceColor::Tier3 => text.red(),
        ConfidenceColor::Tier4 => text.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_colorize_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(colorize("65%", ConfidenceColor::Tier2).to_string(), "65%");
    }
}
