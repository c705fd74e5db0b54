//! Engine configuration loaded from `greenerway-config.yaml`.
//!
//! Every section is optional. A missing key keeps its default and an empty
//! file yields [`AppConfig::default`].

use std::path::{Path, PathBuf};

use greenerway_advisor::{AdvisorConfig, InsightConfig};
use greenerway_progress::ProgressConfig;
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "GREENERWAY_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "greenerway-config.yaml";

/// Environment variable overriding `storage.data_dir`.
pub const DATA_DIR_ENV: &str = "GREENERWAY_DATA_DIR";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The file is not valid YAML or does not match the schema.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recommendation thresholds.
    pub advisor: AdvisorConfig,
    /// Points, savings baseline, and streak calendar.
    pub progress: ProgressConfig,
    /// Conversion-opportunity thresholds.
    pub insights: InsightConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Where the JSON stores live.
    pub storage: StorageConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    pub level: String,
    /// Emit JSON lines instead of human-readable output (default: false).
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// JSON store location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `journeys.json` and `stats.json` (default: "data").
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StorageConfig {
    /// Replace `data_dir` when an override is present and non-empty.
    pub fn apply_data_dir_override(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Path of the journey store file.
    pub fn journeys_path(&self) -> PathBuf {
        self.data_dir.join("journeys.json")
    }

    /// Path of the stats store file.
    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join("stats.json")
    }
}

impl AppConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `GREENERWAY_DATA_DIR`.
    pub fn apply_env_overrides(&mut self) {
        self.storage
            .apply_data_dir_override(std::env::var(DATA_DIR_ENV).ok());
    }
}

/// Path of the configuration file: `GREENERWAY_CONFIG` or the default.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.advisor, AdvisorConfig::default());
        assert_eq!(config.progress, ProgressConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let yaml = r"
advisor:
  walk_max_km: 2.5
progress:
  utc_offset_minutes: 180
  points:
    per_streak_day: 40
logging:
  json: true
";
        let config = AppConfig::parse(yaml).unwrap();
        assert!((config.advisor.walk_max_km - 2.5).abs() < 1e-12);
        assert!((config.advisor.transit_max_km - 15.0).abs() < 1e-12);
        assert_eq!(config.progress.utc_offset_minutes, 180);
        assert_eq!(config.progress.points.per_streak_day, 40);
        assert_eq!(config.progress.points.per_journey, 10);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert!((config.insights.transit_max_km - 12.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = AppConfig::parse("advisor: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = AppConfig::parse("advisor:\n  walk_max_km: far\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/greenerway.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn data_dir_override() {
        let mut storage = StorageConfig::default();
        storage.apply_data_dir_override(Some("  ".to_owned()));
        assert_eq!(storage.data_dir, PathBuf::from("data"));
        storage.apply_data_dir_override(Some("/var/lib/greenerway".to_owned()));
        assert_eq!(storage.stats_path(), PathBuf::from("/var/lib/greenerway/stats.json"));
        assert_eq!(
            storage.journeys_path(),
            PathBuf::from("/var/lib/greenerway/journeys.json")
        );
    }
}
