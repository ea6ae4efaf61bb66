//! Application configuration structures

use rategraph_common::CurrencyCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Currency API configuration
    #[validate]
    pub api: ApiSettings,

    /// Report window and currency selection
    #[validate]
    pub report: ReportSettings,

    /// Chart rendering settings
    #[validate]
    pub chart: ChartSettings,

    /// Document metadata descriptor
    pub metadata: MetadataSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Currency API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiSettings {
    /// Rates CDN base URL, without the version suffix
    #[validate(url(message = "API base URL must be a valid URL"))]
    pub base_url: String,

    /// API version appended as `@{version}` to the base URL
    #[validate(length(min = 1, message = "API version cannot be empty"))]
    pub version: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Maximum number of retries for failed requests
    #[validate(range(max = 10, message = "Max retries cannot exceed 10"))]
    pub max_retries: u32,
}

/// Report window and currency selection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportSettings {
    /// How many past days to fetch, ending yesterday
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub interval_days: u32,

    /// Base currencies, one chart group per entry
    #[validate(length(min = 1, message = "At least one base currency is required"))]
    pub base_currencies: Vec<CurrencyCode>,

    /// Quote currencies, one chart page per (base, quote) pair
    #[validate(length(min = 1, message = "At least one quote currency is required"))]
    pub quote_currencies: Vec<CurrencyCode>,

    /// Output path of the generated PDF document
    #[validate(length(min = 1, message = "Output path cannot be empty"))]
    pub output_path: String,

    /// Named chart style (falls back to the default palette when unknown)
    #[validate(length(min = 1, message = "Style name cannot be empty"))]
    pub style: String,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    /// Page width in pixels
    #[validate(range(min = 320, max = 4000, message = "Width must be between 320 and 4000 pixels"))]
    pub width: u32,

    /// Page height in pixels
    #[validate(range(min = 240, max = 4000, message = "Height must be between 240 and 4000 pixels"))]
    pub height: u32,
}

/// Document metadata descriptor applied to the generated PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level or EnvFilter directive
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use compact single-line formatting
    pub compact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            report: ReportSettings::default(),
            chart: ChartSettings::default(),
            metadata: MetadataSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api".to_string(),
            version: "1".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            interval_days: 14,
            base_currencies: vec![CurrencyCode::new("usd")],
            quote_currencies: vec![CurrencyCode::new("eur")],
            output_path: "rates.pdf".to_string(),
            style: "midnight".to_string(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            title: "Exchange Rates Charts".to_string(),
            author: "rategraph".to_string(),
            subject: "Historical exchange rate trends".to_string(),
            creator: "rategraph".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            compact: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_base_currencies_rejected() {
        let mut config = Config::default();
        config.report.base_currencies.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_range_rejected() {
        let mut config = Config::default();
        config.report.interval_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_normalizes_currency_case() {
        let yaml = r#"
report:
  base_currencies: ["USD", "Eur"]
  quote_currencies: ["GBP"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.report.base_currencies,
            vec![CurrencyCode::new("usd"), CurrencyCode::new("eur")]
        );
        assert_eq!(
            config.report.quote_currencies,
            vec![CurrencyCode::new("gbp")]
        );
    }
}
