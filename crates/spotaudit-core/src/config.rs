use crate::error::{Result, SpotauditError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered audit configuration: defaults, then TOML file, then
/// environment, then CLI overrides.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Minimum decimal digits per axis before a record is flagged
    /// low-precision. 3 digits is roughly 100 m.
    pub min_decimal_digits: ConfigValue<usize>,
    /// Both axes at or below this digit count marks a very-round
    /// coordinate (placeholder placement).
    pub very_round_max_digits: ConfigValue<usize>,
    /// Cross-partition proximity window in degrees per axis.
    pub proximity_epsilon_deg: ConfigValue<f64>,
    /// Planar distance from the region centroid beyond which a record
    /// is an outlier.
    pub outlier_threshold_deg: ConfigValue<f64>,
    /// Expansion applied to region boxes to absorb near-border
    /// placements.
    pub region_tolerance_deg: ConfigValue<f64>,
    /// Base URL of the reverse-geocoding service.
    pub lookup_base_url: ConfigValue<String>,
    /// Descriptive client identifier, mandatory on every request per
    /// the service's usage policy.
    pub lookup_user_agent: ConfigValue<String>,
    /// Accept-Language hint sent with every lookup.
    pub lookup_accept_language: ConfigValue<String>,
    /// Hard per-call timeout in seconds.
    pub lookup_timeout_secs: ConfigValue<u64>,
    /// Bounded retries for transient lookup failures.
    pub lookup_max_retries: ConfigValue<u32>,
    /// Minimum spacing between requests in milliseconds.
    pub lookup_min_interval_ms: ConfigValue<u64>,
}

impl AuditConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            min_decimal_digits: ConfigValue::new(3, ConfigSource::Default),
            very_round_max_digits: ConfigValue::new(2, ConfigSource::Default),
            proximity_epsilon_deg: ConfigValue::new(0.005, ConfigSource::Default),
            outlier_threshold_deg: ConfigValue::new(1.5, ConfigSource::Default),
            region_tolerance_deg: ConfigValue::new(0.5, ConfigSource::Default),
            lookup_base_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            lookup_user_agent: ConfigValue::new(
                "spotaudit/0.1 (catalog-data@tsurispot.jp)".to_string(),
                ConfigSource::Default,
            ),
            lookup_accept_language: ConfigValue::new("ja".to_string(), ConfigSource::Default),
            lookup_timeout_secs: ConfigValue::new(10, ConfigSource::Default),
            lookup_max_retries: ConfigValue::new(2, ConfigSource::Default),
            lookup_min_interval_ms: ConfigValue::new(1100, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| SpotauditError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| SpotauditError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(v) = file_config.min_decimal_digits {
            self.min_decimal_digits.update(v, ConfigSource::File);
        }
        if let Some(v) = file_config.very_round_max_digits {
            self.very_round_max_digits.update(v, ConfigSource::File);
        }
        if let Some(v) = file_config.proximity_epsilon_deg {
            self.proximity_epsilon_deg.update(v, ConfigSource::File);
        }
        if let Some(v) = file_config.outlier_threshold_deg {
            self.outlier_threshold_deg.update(v, ConfigSource::File);
        }
        if let Some(v) = file_config.region_tolerance_deg {
            self.region_tolerance_deg.update(v, ConfigSource::File);
        }

        if let Some(lookup) = file_config.lookup {
            if let Some(v) = lookup.base_url {
                self.lookup_base_url.update(v, ConfigSource::File);
            }
            if let Some(v) = lookup.user_agent {
                self.lookup_user_agent.update(v, ConfigSource::File);
            }
            if let Some(v) = lookup.accept_language {
                self.lookup_accept_language.update(v, ConfigSource::File);
            }
            if let Some(v) = lookup.timeout_secs {
                self.lookup_timeout_secs.update(v, ConfigSource::File);
            }
            if let Some(v) = lookup.max_retries {
                self.lookup_max_retries.update(v, ConfigSource::File);
            }
            if let Some(v) = lookup.min_interval_ms {
                self.lookup_min_interval_ms.update(v, ConfigSource::File);
            }
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(s) = env::var("SPOTAUDIT_MIN_DECIMAL_DIGITS") {
            match s.parse::<usize>() {
                Ok(v) => self.min_decimal_digits.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SPOTAUDIT_MIN_DECIMAL_DIGITS value '{}': expected integer",
                    s
                ),
            }
        }

        if let Ok(s) = env::var("SPOTAUDIT_PROXIMITY_EPSILON_DEG") {
            match s.parse::<f64>() {
                Ok(v) => self.proximity_epsilon_deg.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SPOTAUDIT_PROXIMITY_EPSILON_DEG value '{}': expected number",
                    s
                ),
            }
        }

        if let Ok(s) = env::var("SPOTAUDIT_OUTLIER_THRESHOLD_DEG") {
            match s.parse::<f64>() {
                Ok(v) => self.outlier_threshold_deg.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SPOTAUDIT_OUTLIER_THRESHOLD_DEG value '{}': expected number",
                    s
                ),
            }
        }

        if let Ok(s) = env::var("SPOTAUDIT_LOOKUP_BASE_URL") {
            self.lookup_base_url.update(s, ConfigSource::Environment);
        }

        if let Ok(s) = env::var("SPOTAUDIT_LOOKUP_USER_AGENT") {
            self.lookup_user_agent.update(s, ConfigSource::Environment);
        }

        if let Ok(s) = env::var("SPOTAUDIT_LOOKUP_TIMEOUT_SECS") {
            match s.parse::<u64>() {
                Ok(v) => self.lookup_timeout_secs.update(v, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SPOTAUDIT_LOOKUP_TIMEOUT_SECS value '{}': expected integer",
                    s
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(v) = overrides.min_decimal_digits {
            self.min_decimal_digits.update(v, ConfigSource::Cli);
        }
        if let Some(v) = overrides.proximity_epsilon_deg {
            self.proximity_epsilon_deg.update(v, ConfigSource::Cli);
        }
        if let Some(v) = overrides.outlier_threshold_deg {
            self.outlier_threshold_deg.update(v, ConfigSource::Cli);
        }
        if let Some(v) = overrides.lookup_base_url {
            self.lookup_base_url.update(v, ConfigSource::Cli);
        }
        if let Some(v) = overrides.lookup_timeout_secs {
            self.lookup_timeout_secs.update(v, ConfigSource::Cli);
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    min_decimal_digits: Option<usize>,
    very_round_max_digits: Option<usize>,
    proximity_epsilon_deg: Option<f64>,
    outlier_threshold_deg: Option<f64>,
    region_tolerance_deg: Option<f64>,
    lookup: Option<LookupFileConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
struct LookupFileConfig {
    base_url: Option<String>,
    user_agent: Option<String>,
    accept_language: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    min_interval_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub min_decimal_digits: Option<usize>,
    pub proximity_epsilon_deg: Option<f64>,
    pub outlier_threshold_deg: Option<f64>,
    pub lookup_base_url: Option<String>,
    pub lookup_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AuditConfig::with_defaults();
        assert_eq!(config.min_decimal_digits.value, 3);
        assert_eq!(config.very_round_max_digits.value, 2);
        assert_eq!(config.proximity_epsilon_deg.value, 0.005);
        assert_eq!(config.outlier_threshold_deg.value, 1.5);
        assert_eq!(config.region_tolerance_deg.value, 0.5);
        assert_eq!(config.min_decimal_digits.source, ConfigSource::Default);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
min_decimal_digits = 4
outlier_threshold_deg = 2.0

[lookup]
base_url = "http://localhost:8088"
timeout_secs = 5
"#
        )
        .unwrap();

        let config = AuditConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.min_decimal_digits.value, 4);
        assert_eq!(config.min_decimal_digits.source, ConfigSource::File);
        assert_eq!(config.outlier_threshold_deg.value, 2.0);
        assert_eq!(config.lookup_base_url.value, "http://localhost:8088");
        assert_eq!(config.lookup_timeout_secs.value, 5);
        // Untouched keys keep their defaults
        assert_eq!(config.proximity_epsilon_deg.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "min_decimal_digits = ").unwrap();

        let result = AuditConfig::with_defaults().load_from_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        env::set_var("SPOTAUDIT_MIN_DECIMAL_DIGITS", "5");
        env::set_var("SPOTAUDIT_LOOKUP_BASE_URL", "http://localhost:9999");

        let config = AuditConfig::with_defaults().load_from_env();
        assert_eq!(config.min_decimal_digits.value, 5);
        assert_eq!(config.min_decimal_digits.source, ConfigSource::Environment);
        assert_eq!(config.lookup_base_url.value, "http://localhost:9999");

        env::remove_var("SPOTAUDIT_MIN_DECIMAL_DIGITS");
        env::remove_var("SPOTAUDIT_LOOKUP_BASE_URL");
    }

    #[test]
    #[serial]
    fn test_invalid_env_value_keeps_default() {
        env::set_var("SPOTAUDIT_MIN_DECIMAL_DIGITS", "not-a-number");

        let config = AuditConfig::with_defaults().load_from_env();
        assert_eq!(config.min_decimal_digits.value, 3);
        assert_eq!(config.min_decimal_digits.source, ConfigSource::Default);

        env::remove_var("SPOTAUDIT_MIN_DECIMAL_DIGITS");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AuditConfig::with_defaults();

        let overrides = CliConfigOverrides {
            outlier_threshold_deg: Some(1.0),
            lookup_timeout_secs: Some(3),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.outlier_threshold_deg.value, 1.0);
        assert_eq!(config.outlier_threshold_deg.source, ConfigSource::Cli);
        assert_eq!(config.lookup_timeout_secs.value, 3);
        // These should still be defaults
        assert_eq!(config.min_decimal_digits.source, ConfigSource::Default);
    }
}
