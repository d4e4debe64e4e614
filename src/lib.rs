//! Burrow consumer-lag Prometheus exporter library.

pub mod burrow;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod scrape;

pub use config::schema::ExporterConfig;
pub use lifecycle::Shutdown;
pub use scrape::Scraper;
