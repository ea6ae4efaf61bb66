//! Common utilities and types for rategraph

pub mod api;
pub mod error;
pub mod logging;
#[cfg(feature = "testing")]
pub mod test_utils;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use api::{ApiConfig, CurrencyApiClient, RateFetcher};
pub use error::{RateGraphError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::{CurrencyCode, RateObservation};
