//! Concurrent aggregation of historical FX rates into per-currency series

pub mod series;
pub mod storage;

pub use series::{CurrencySeries, SeriesRow};
pub use storage::{RatesStorage, RatesStore};
