//! Concurrent best-effort aggregation of rate observations

use crate::series::CurrencySeries;
use chrono::NaiveDate;
use futures::future;
use rategraph_common::{CurrencyCode, RateFetcher, RateGraphError, RateObservation, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

/// Mapping from base currency to its assembled series.
///
/// Rebuilt wholesale on every aggregation run; never mutated incrementally.
/// Contains exactly one entry per requested currency that produced at least
/// one successful observation.
#[derive(Debug, Clone, Default)]
pub struct RatesStore {
    series: BTreeMap<CurrencyCode, CurrencySeries>,
}

impl RatesStore {
    /// Series for one base currency, if it was aggregated
    pub fn series(&self, currency: &CurrencyCode) -> Option<&CurrencySeries> {
        self.series.get(currency)
    }

    /// Aggregated base currencies, in deterministic order
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.series.keys()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Aggregation engine: fetches the cross-product of dates and currencies
/// concurrently and reassembles the successes into ordered series.
///
/// Individual fetch failures are absorbed; the engine fails only when a
/// requested currency yields zero successful observations.
pub struct RatesStorage<F> {
    fetcher: F,
    rates: RatesStore,
}

impl<F: RateFetcher> RatesStorage<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            rates: RatesStore::default(),
        }
    }

    /// Latest aggregated store
    pub fn rates(&self) -> &RatesStore {
        &self.rates
    }

    /// Fetch `dates × currencies` concurrently and rebuild the store.
    ///
    /// The stored result is replaced only after every requested currency has
    /// been validated; on error the previous store is left untouched.
    #[instrument(skip_all, fields(dates = dates.len(), currencies = currencies.len()))]
    pub async fn update(
        &mut self,
        dates: &[NaiveDate],
        currencies: &[CurrencyCode],
    ) -> Result<&RatesStore> {
        // Set semantics: duplicates in either input collapse
        let dates: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        let currencies: BTreeSet<CurrencyCode> = currencies.iter().cloned().collect();

        if currencies.is_empty() {
            return Err(RateGraphError::validation(
                "at least one base currency is required",
            ));
        }

        // One request per (date, currency) pair, all in flight at once.
        // Completion order is irrelevant: ordering is imposed at assembly.
        let requests: Vec<(NaiveDate, &CurrencyCode)> = dates
            .iter()
            .flat_map(|date| currencies.iter().map(move |currency| (*date, currency)))
            .collect();
        debug!(requests = requests.len(), "issuing fetch batch");

        let results = future::join_all(
            requests
                .iter()
                .map(|(date, currency)| self.fetcher.fetch(*date, currency)),
        )
        .await;

        let mut grouped: BTreeMap<CurrencyCode, Vec<RateObservation>> = BTreeMap::new();
        let mut failures = 0usize;
        for result in results {
            match result {
                Ok(observation) => grouped
                    .entry(observation.currency.clone())
                    .or_default()
                    .push(observation),
                Err(error) => {
                    failures += 1;
                    warn!(error = %error, "fetch failed, observation excluded");
                }
            }
        }

        let mut series = BTreeMap::new();
        for currency in &currencies {
            let observations = grouped.remove(currency).unwrap_or_default();
            if observations.is_empty() {
                return Err(RateGraphError::storage(currency.as_str()));
            }
            series.insert(
                currency.clone(),
                CurrencySeries::from_observations(observations),
            );
        }

        info!(
            currencies = series.len(),
            failures, "aggregation complete, store replaced"
        );
        self.rates = RatesStore { series };
        Ok(&self.rates)
    }
}
