//! Trend chart rendering and multi-page PDF assembly for rategraph

pub mod document;
pub mod page;
pub mod style;
pub mod trend;

pub use document::{ChartsPdfBuilder, DocumentMeta};
pub use page::PageRenderer;
pub use style::Palette;
pub use trend::{format_rate, SummaryStats, Trend};
