//! Error types and utilities for rategraph

use thiserror::Error;

/// Result type alias for rategraph operations
pub type Result<T> = std::result::Result<T, RateGraphError>;

/// Main error type for rategraph operations
#[derive(Error, Debug)]
pub enum RateGraphError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP transport, timeouts, etc.)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single currency API request failed; carries the endpoint identity
    #[error("Currency API error at {endpoint}")]
    Api {
        endpoint: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A requested base currency yielded no successful observations
    #[error("Fetched no data for currency `{currency}`")]
    Storage { currency: String },

    /// A requested (base, quote) pair has no data to render
    #[error("Render error: {message}")]
    Render { message: String },

    /// Document assembly or drawing errors
    #[error("Document error: {message}")]
    Document {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for user input or configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RateGraphError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new currency API error for an endpoint
    pub fn api(endpoint: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new currency API error with HTTP status
    pub fn api_with_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new currency API error with source
    pub fn api_with_source(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new currency-scoped storage error
    pub fn storage(currency: impl Into<String>) -> Self {
        Self::Storage {
            currency: currency.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    /// Create a new document error
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new document error with source
    pub fn document_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Document {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to RateGraphError
impl From<reqwest::Error> for RateGraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to RateGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for RateGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::document_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = RateGraphError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = RateGraphError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let api_error = RateGraphError::api_with_status("/2022-05-18/currencies/usd.min.json", 404);
        assert!(api_error.to_string().contains("Currency API error"));
        assert!(api_error.to_string().contains("usd.min.json"));

        let storage_error = RateGraphError::storage("eur");
        assert_eq!(
            storage_error.to_string(),
            "Fetched no data for currency `eur`"
        );

        let render_error = RateGraphError::render("no column `gbp` in series for `usd`");
        assert!(render_error.to_string().contains("Render error"));
        assert!(render_error.to_string().contains("gbp"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = RateGraphError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let api_source_error = RateGraphError::api_with_source(
            "/currencies/usd.min.json",
            io::Error::new(io::ErrorKind::ConnectionReset, "reset"),
        );
        assert!(api_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rg_error: RateGraphError = io_error.into();

        assert!(rg_error.to_string().contains("I/O error"));
        assert!(rg_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let rg_error: RateGraphError = serde_error.into();

        assert!(rg_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_storage_error_names_currency() {
        let error = RateGraphError::storage("chf");
        match error {
            RateGraphError::Storage { currency } => assert_eq!(currency, "chf"),
            other => panic!("expected Storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(RateGraphError::new("failure"))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
