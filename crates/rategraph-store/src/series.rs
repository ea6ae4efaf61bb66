//! Per-currency time series assembled from rate observations

use chrono::NaiveDate;
use rategraph_common::{CurrencyCode, RateObservation};
use std::collections::BTreeMap;

/// One dated row of quote-currency rates.
///
/// Sparse: a quote currency absent from the source observation is absent
/// from the row. Readers treat a missing entry as "no data for this pair on
/// this date", not zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

/// Date-ordered rows for one base currency.
///
/// Invariant: rows ascend strictly by date. Duplicate observation dates
/// collapse to the last one seen in iteration order (last-write-wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencySeries {
    rows: Vec<SeriesRow>,
}

impl CurrencySeries {
    /// Assemble a series from observations. Date order is imposed here, at
    /// assembly time, independent of the observations' arrival order.
    pub fn from_observations(observations: impl IntoIterator<Item = RateObservation>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, BTreeMap<CurrencyCode, f64>> = BTreeMap::new();
        for observation in observations {
            by_date.insert(observation.date, observation.rates);
        }

        Self {
            rows: by_date
                .into_iter()
                .map(|(date, rates)| SeriesRow { date, rates })
                .collect(),
        }
    }

    /// Rows in ascending date order
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract the `(date, rate)` points for one quote currency, skipping
    /// rows that carry no value for it. The result keeps the series' date
    /// order; it is empty when no row ever saw the quote.
    pub fn column(&self, quote: &CurrencyCode) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.rates.get(quote).map(|rate| (row.date, *rate)))
            .collect()
    }
}
