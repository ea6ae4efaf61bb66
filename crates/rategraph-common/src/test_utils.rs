//! Test utilities and shared fixtures for the rategraph workspace.
//!
//! Gated behind the `testing` feature so production builds never carry the
//! canned fetcher.

use crate::api::RateFetcher;
use crate::error::{RateGraphError, Result};
use crate::types::{CurrencyCode, RateObservation};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call multiple times; only the first call takes effect.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .init();
    });
}

/// Calendar date fixture
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Canned rate fetcher: responds from a fixed table, fails everywhere else
#[derive(Debug, Default)]
pub struct StubRateFetcher {
    responses: HashMap<(NaiveDate, CurrencyCode), BTreeMap<CurrencyCode, f64>>,
    failing: HashSet<CurrencyCode>,
}

impl StubRateFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (date, base, quote) -> rate entry
    pub fn with_rate(mut self, date: NaiveDate, base: &str, quote: &str, rate: f64) -> Self {
        self.responses
            .entry((date, CurrencyCode::new(base)))
            .or_default()
            .insert(CurrencyCode::new(quote), rate);
        self
    }

    /// Make every request for `base` fail
    pub fn failing_for(mut self, base: &str) -> Self {
        self.failing.insert(CurrencyCode::new(base));
        self
    }
}

#[async_trait]
impl RateFetcher for StubRateFetcher {
    async fn fetch(&self, date: NaiveDate, base: &CurrencyCode) -> Result<RateObservation> {
        let endpoint = format!("/{}/currencies/{}.min.json", date, base);
        if self.failing.contains(base) {
            return Err(RateGraphError::api(endpoint));
        }
        match self.responses.get(&(date, base.clone())) {
            Some(rates) => Ok(RateObservation {
                currency: base.clone(),
                date,
                rates: rates.clone(),
            }),
            None => Err(RateGraphError::api(endpoint)),
        }
    }
}
