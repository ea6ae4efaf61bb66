//! Configuration schema and loading for rategraph

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    ApiSettings, ChartSettings, Config, LoggingSettings, MetadataSettings, ReportSettings,
};
