//! Utility functions used across the rategraph crates

use crate::types::CurrencyCode;
use chrono::{Duration, NaiveDate, Utc};

/// Dates for a reporting window of `days_back` days, most recent first.
/// The window ends yesterday; today is excluded.
pub fn window_dates(days_back: u32) -> Vec<NaiveDate> {
    window_dates_from(Utc::now().date_naive(), days_back)
}

/// Same window, anchored at an explicit `today`
pub fn window_dates_from(today: NaiveDate, days_back: u32) -> Vec<NaiveDate> {
    (0..days_back)
        .map(|days| today - Duration::days(i64::from(days) + 1))
        .collect()
}

/// Split a comma-separated list into currency codes, dropping empty segments
pub fn parse_currency_list(raw: &str) -> Vec<CurrencyCode> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(CurrencyCode::new)
        .collect()
}
