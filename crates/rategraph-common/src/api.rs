//! Currency API client with connection pooling and bounded retry
//!
//! One request fetches the full rate mapping for a single (date, base
//! currency) pair. Transient failures (timeouts, connection errors, 5xx)
//! are retried with exponential backoff; client errors are not.

use crate::error::{RateGraphError, Result};
use crate::types::{CurrencyCode, RateObservation};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Configuration for the currency API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the rates CDN, without the version suffix
    pub base_url: String,
    /// API version appended as `@{version}` to the base URL
    pub version: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Connection pool max idle connections per host (default: 10)
    pub max_idle_per_host: usize,
    /// Maximum number of retry attempts per request (default: 3)
    pub max_retries: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api".to_string(),
            version: "1".to_string(),
            timeout_secs: 30,
            max_idle_per_host: 10,
            max_retries: 3,
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, max_idle_per_host: usize) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self
    }

    /// Set the maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Source of rate observations, one (date, base currency) pair per call.
///
/// The aggregation engine is generic over this seam so tests can substitute
/// a canned fetcher.
#[async_trait]
pub trait RateFetcher: Send + Sync {
    /// Fetch the full rate mapping for `base` as observed on `date`
    async fn fetch(&self, date: NaiveDate, base: &CurrencyCode) -> Result<RateObservation>;
}

/// Currency API client with a shared connection pool
#[derive(Debug, Clone)]
pub struct CurrencyApiClient {
    client: Client,
    config: ApiConfig,
}

impl CurrencyApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| RateGraphError::config_with_source("Invalid API base URL", e))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| RateGraphError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ApiConfig::default())
    }

    /// Full endpoint URL for one (date, base currency) request
    fn endpoint_url(&self, date: NaiveDate, base: &CurrencyCode) -> String {
        format!(
            "{}@{}/{}/currencies/{}.min.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.version,
            date.format("%Y-%m-%d"),
            base
        )
    }

    /// Issue a GET with retry on transient failures, returning the body text
    async fn get_text(&self, endpoint: &str) -> Result<String> {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries);

        let response: Response = RetryIf::spawn(
            retry_strategy,
            || async {
                match self.client.get(endpoint).send().await {
                    Ok(response) => {
                        let status = response.status();
                        if status.is_success() {
                            debug!(%endpoint, %status, "request successful");
                            Ok(response)
                        } else if status.is_client_error() {
                            error!(%endpoint, %status, "client error from currency API");
                            Err(RateGraphError::api_with_status(endpoint, status.as_u16()))
                        } else {
                            warn!(%endpoint, %status, "server error from currency API, will retry");
                            Err(RateGraphError::api_with_status(endpoint, status.as_u16()))
                        }
                    }
                    Err(e) if e.is_timeout() => {
                        warn!(%endpoint, "request timeout, will retry");
                        Err(RateGraphError::api_with_source(endpoint, e))
                    }
                    Err(e) if e.is_connect() => {
                        warn!(%endpoint, "connection error, will retry");
                        Err(RateGraphError::api_with_source(endpoint, e))
                    }
                    Err(e) => {
                        error!(%endpoint, error = %e, "request failed");
                        Err(RateGraphError::api_with_source(endpoint, e))
                    }
                }
            },
            is_retryable,
        )
        .await?;

        response
            .text()
            .await
            .map_err(|e| RateGraphError::api_with_source(endpoint, e))
    }
}

/// Client errors (4xx) are final; everything else is worth another attempt
fn is_retryable(err: &RateGraphError) -> bool {
    match err {
        RateGraphError::Api {
            status_code: Some(status),
            ..
        } => *status >= 500,
        RateGraphError::Api { .. } => true,
        _ => false,
    }
}

/// Parse the wire payload `{"date": "YYYY-MM-DD", "<base>": {"<quote>": rate}}`
fn parse_observation(endpoint: &str, base: &CurrencyCode, body: &str) -> Result<RateObservation> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| RateGraphError::api_with_source(endpoint, e))?;

    let date_str = value
        .get("date")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            RateGraphError::api_with_source(endpoint, RateGraphError::new("payload missing `date`"))
        })?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| RateGraphError::api_with_source(endpoint, e))?;

    let rates_value = value.get(base.as_str()).cloned().ok_or_else(|| {
        RateGraphError::api_with_source(
            endpoint,
            RateGraphError::new(format!("payload missing rates for `{}`", base)),
        )
    })?;
    let rates: BTreeMap<CurrencyCode, f64> = serde_json::from_value(rates_value)
        .map_err(|e| RateGraphError::api_with_source(endpoint, e))?;

    Ok(RateObservation {
        currency: base.clone(),
        date,
        rates,
    })
}

#[async_trait]
impl RateFetcher for CurrencyApiClient {
    #[instrument(skip(self))]
    async fn fetch(&self, date: NaiveDate, base: &CurrencyCode) -> Result<RateObservation> {
        let endpoint = self.endpoint_url(date, base);
        let body = self.get_text(&endpoint).await?;
        debug!(%endpoint, bytes = body.len(), "raw response received");
        parse_observation(&endpoint, base, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CurrencyApiClient {
        CurrencyApiClient::with_defaults().unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 18).unwrap();
        let url = client().endpoint_url(date, &CurrencyCode::new("USD"));
        assert_eq!(
            url,
            "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api@1/2022-05-18/currencies/usd.min.json"
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = ApiConfig::new("https://example.com/rates/", "2");
        let client = CurrencyApiClient::new(config).unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(
            client.endpoint_url(date, &CurrencyCode::new("eur")),
            "https://example.com/rates@2/2023-01-02/currencies/eur.min.json"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig::new("not a url", "1");
        assert!(CurrencyApiClient::new(config).is_err());
    }

    #[test]
    fn test_parse_observation() {
        let body = r#"{"date": "2022-05-18", "usd": {"eur": 0.95, "gbp": 0.8}}"#;
        let obs = parse_observation("/test", &CurrencyCode::new("usd"), body).unwrap();

        assert_eq!(obs.currency, CurrencyCode::new("usd"));
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2022, 5, 18).unwrap());
        assert_eq!(obs.rates.get(&CurrencyCode::new("eur")), Some(&0.95));
        assert_eq!(obs.rates.get(&CurrencyCode::new("gbp")), Some(&0.8));
    }

    #[test]
    fn test_parse_observation_normalizes_quote_case() {
        let body = r#"{"date": "2022-05-18", "usd": {"EUR": 0.95}}"#;
        let obs = parse_observation("/test", &CurrencyCode::new("usd"), body).unwrap();
        assert_eq!(obs.rates.get(&CurrencyCode::new("eur")), Some(&0.95));
    }

    #[test]
    fn test_parse_observation_missing_date() {
        let body = r#"{"usd": {"eur": 0.95}}"#;
        let err = parse_observation("/test", &CurrencyCode::new("usd"), body).unwrap_err();
        assert!(matches!(err, RateGraphError::Api { .. }));
    }

    #[test]
    fn test_parse_observation_missing_base_key() {
        let body = r#"{"date": "2022-05-18", "eur": {"usd": 1.05}}"#;
        let err = parse_observation("/test", &CurrencyCode::new("usd"), body).unwrap_err();
        assert!(matches!(err, RateGraphError::Api { .. }));
    }

    #[test]
    fn test_parse_observation_malformed_json() {
        let err = parse_observation("/test", &CurrencyCode::new("usd"), "not json").unwrap_err();
        assert!(matches!(err, RateGraphError::Api { .. }));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(is_retryable(&RateGraphError::api_with_status("/e", 500)));
        assert!(is_retryable(&RateGraphError::api_with_status("/e", 503)));
        assert!(!is_retryable(&RateGraphError::api_with_status("/e", 404)));
        assert!(is_retryable(&RateGraphError::api("/e")));
        assert!(!is_retryable(&RateGraphError::storage("usd")));
    }

    #[test]
    fn test_config_builders() {
        let config = ApiConfig::new("https://example.com", "1")
            .with_timeout(5)
            .with_pool_size(2)
            .with_max_retries(0);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_idle_per_host, 2);
        assert_eq!(config.max_retries, 0);
    }
}
