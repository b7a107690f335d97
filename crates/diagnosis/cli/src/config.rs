//! Configuration for cfdx

use std::path::PathBuf;

use diagnosis_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog file used when `--catalog` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Engine tunables
    #[serde(default)]
    pub engine: EngineConfig,

    /// Session recording
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session recording configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// JSON-lines store; sessions are kept in memory only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration: defaults, then the optional file, then `CFDX_*`
    /// environment variables (`__` separates nested keys, e.g.
    /// `CFDX_ENGINE__TIE_BREAK=rule_order`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&CliConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CFDX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnosis_engine::TieBreak;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.catalog.is_none());
        assert!(config.sessions.store.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(!config.engine.strict_ranges);
        assert_eq!(config.engine.tie_break, TieBreak::DamageId);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
catalog = "catalogs/motorcycle.json"

[engine]
tie_break = "rule_order"
strict_ranges = true

[sessions]
store = "/var/lib/cfdx/sessions.jsonl"
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("catalogs/motorcycle.json")));
        assert_eq!(config.engine.tie_break, TieBreak::RuleOrder);
        assert!(config.engine.strict_ranges);
        assert_eq!(
            config.sessions.store,
            Some(PathBuf::from("/var/lib/cfdx/sessions.jsonl"))
        );
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::load(Some("/nonexistent/cfdx.toml")).is_err());
    }
}
