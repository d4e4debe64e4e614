//! Scrape engine: scheduler plus two-level concurrent fan-out.
//!
//! # Data Flow
//! ```text
//! scheduler.rs (fixed-interval tick)
//!     → processor.rs run_cycle: list clusters
//!         → per cluster (bounded fan-out): list consumer groups
//!             → per group (bounded fan-out): fetch lag → write gauges
//!         ← join barrier per cluster
//!     ← join barrier per cycle
//! ```
//!
//! # Design Decisions
//! - Failures are handled at the level they occur and never propagated; a
//!   failed child is indistinguishable at the barrier from one that never
//!   existed
//! - Cycles never overlap: the next tick is not honored until the previous
//!   cycle's entire fan-out has joined
//! - Fan-out at both levels is bounded by configurable semaphores instead
//!   of unbounded task spawning

pub mod processor;
pub mod scheduler;

pub use scheduler::Scraper;
