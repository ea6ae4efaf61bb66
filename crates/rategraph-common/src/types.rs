//! Core domain types shared across the rategraph crates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Short currency identifier (e.g. "usd"), folded to lowercase once at
/// construction. Used both as a request parameter and as a grouping key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a code, trimming surrounding whitespace and lowercasing
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case display form used in chart titles and page headers
    pub fn ticker(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// One fetch result: the full rate mapping for a (date, base currency) pair.
/// Immutable once created; consumed by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    /// Base currency the rates are quoted against
    pub currency: CurrencyCode,
    /// Calendar date the rates were observed on
    pub date: NaiveDate,
    /// Quote currency -> rate
    pub rates: BTreeMap<CurrencyCode, f64>,
}
