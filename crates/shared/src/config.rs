//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scheduled sweep configuration.
    #[serde(default)]
    pub sweeper: SweeperConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Scheduled sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweeperConfig {
    /// Seconds between two sweep runs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// JSON fixture describing policy, leave types, holidays and employees.
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
    /// Run a single sweep and exit.
    #[serde(default)]
    pub run_once: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fixture_path: default_fixture_path(),
            run_once: false,
        }
    }
}

fn default_interval_secs() -> u64 {
    3600 // hourly
}

fn default_fixture_path() -> String {
    "config/fixture.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "leavebook=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEAVEBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_vars_unset(
            ["LEAVEBOOK__SWEEPER__INTERVAL_SECS", "LEAVEBOOK__LOG__FILTER"],
            AppConfig::load,
        )
        .unwrap();
        assert_eq!(config.sweeper.interval_secs, 3600);
        assert_eq!(config.sweeper.fixture_path, "config/fixture.json");
        assert!(!config.sweeper.run_once);
        assert_eq!(config.log.filter, "leavebook=debug");
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("LEAVEBOOK__SWEEPER__INTERVAL_SECS", Some("60")),
                ("LEAVEBOOK__LOG__FILTER", Some("leavebook=info")),
            ],
            AppConfig::load,
        )
        .unwrap();
        assert_eq!(config.sweeper.interval_secs, 60);
        assert_eq!(config.log.filter, "leavebook=info");
    }
}
