//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! scrape engine
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (lag gauges + exporter self-metrics)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The scrape engine writes through the `LagSink` trait, not the global
//!   recorder directly, so tests can observe exactly what was recorded
//! - Gauge writes are last-write-wins overwrites; series are never deleted,
//!   so entities that vanish upstream keep exposing their last-known values

pub mod logging;
pub mod metrics;

pub use metrics::{LagSink, PrometheusSink};
