//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger snapshot configuration.
    pub snapshot: SnapshotConfig,
    /// Report computation configuration.
    pub reporting: ReportingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Ledger snapshot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path of the JSON snapshot file read by the reporter.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/snapshot.json".to_string()
}

/// Report computation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportingConfig {
    /// Accept movements whose stated balance is negative (overdrafts).
    #[serde(default)]
    pub allow_negative_balance: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "ledgerview=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources are layered in order: `config/default`, `config/{RUN_MODE}`,
    /// then `LEDGERVIEW__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERVIEW").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "LEDGERVIEW__SNAPSHOT__PATH",
                "LEDGERVIEW__REPORTING__ALLOW_NEGATIVE_BALANCE",
                "LEDGERVIEW__LOGGING__FILTER",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.snapshot.path, "data/snapshot.json");
                assert!(!config.reporting.allow_negative_balance);
                assert_eq!(config.logging.filter, "ledgerview=info");
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("LEDGERVIEW__SNAPSHOT__PATH", Some("/tmp/ledger.json")),
                ("LEDGERVIEW__REPORTING__ALLOW_NEGATIVE_BALANCE", Some("true")),
                ("LEDGERVIEW__LOGGING__FILTER", Some("ledgerview=debug")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.snapshot.path, "/tmp/ledger.json");
                assert!(config.reporting.allow_negative_balance);
                assert_eq!(config.logging.filter, "ledgerview=debug");
            },
        );
    }
}
