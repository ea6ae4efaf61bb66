//! Configuration loading utilities

use crate::Config;
use rategraph_common::utils::parse_currency_list;
use rategraph_common::Result as RateGraphResult;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for rategraph_common::RateGraphError {
    fn from(err: ConfigError) -> Self {
        rategraph_common::RateGraphError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        validator::Validate::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> RateGraphResult<Config> {
        let config = if let Ok(config_path) = env::var("RATEGRAPH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            validator::Validate::validate(&config).map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RateGraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // API configuration overrides
        if let Ok(base_url) = env::var("BASE_API_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(version) = env::var("CURRENCY_API_VERSION") {
            config.api.version = version;
        }

        if let Ok(timeout) = env::var("API_TIMEOUT") {
            config.api.timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "API_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(retries) = env::var("API_MAX_RETRIES") {
            config.api.max_retries = retries.parse().map_err(|e| ConfigError::EnvParseError {
                var: "API_MAX_RETRIES".to_string(),
                source: Box::new(e),
            })?;
        }

        // Report configuration overrides
        if let Ok(days) = env::var("INTERVAL_DAYS") {
            config.report.interval_days =
                days.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "INTERVAL_DAYS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(currencies) = env::var("BASE_CURRENCIES") {
            config.report.base_currencies = parse_currency_list(&currencies);
        }

        if let Ok(currencies) = env::var("QUOTE_CURRENCIES") {
            config.report.quote_currencies = parse_currency_list(&currencies);
        }

        if let Ok(path) = env::var("PDF_FILE_PATH") {
            config.report.output_path = path;
        }

        if let Ok(style) = env::var("PLOTS_STYLE") {
            config.report.style = style;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rategraph_common::CurrencyCode;
    use std::io::Write;

    #[test]
    fn test_load_config_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
report:
  interval_days: 7
  base_currencies: ["usd", "gbp"]
  quote_currencies: ["eur"]
  output_path: "out/report.pdf"
  style: "light"
chart:
  width: 800
  height: 600
"#
        )
        .unwrap();

        let config = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(config.report.interval_days, 7);
        assert_eq!(config.report.base_currencies.len(), 2);
        assert_eq!(config.report.output_path, "out/report.pdf");
        assert_eq!(config.chart.width, 800);
        // Untouched sections keep their defaults
        assert_eq!(config.api.version, "1");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
report:
  interval_days: 0
"#
        )
        .unwrap();

        assert!(ConfigLoader::load_config(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("INTERVAL_DAYS", "30");
        env::set_var("BASE_CURRENCIES", "chf,NOK");
        env::set_var("PLOTS_STYLE", "light");

        let mut config = Config::default();
        ConfigLoader::apply_env_overrides(&mut config).unwrap();

        env::remove_var("INTERVAL_DAYS");
        env::remove_var("BASE_CURRENCIES");
        env::remove_var("PLOTS_STYLE");

        assert_eq!(config.report.interval_days, 30);
        assert_eq!(
            config.report.base_currencies,
            vec![CurrencyCode::new("chf"), CurrencyCode::new("nok")]
        );
        assert_eq!(config.report.style, "light");
    }

    #[test]
    fn test_env_override_parse_failure() {
        env::set_var("API_TIMEOUT", "soon");

        let mut config = Config::default();
        let result = ConfigLoader::apply_env_overrides(&mut config);

        env::remove_var("API_TIMEOUT");

        assert!(matches!(
            result,
            Err(ConfigError::EnvParseError { ref var, .. }) if var == "API_TIMEOUT"
        ));
    }
}
