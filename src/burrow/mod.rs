//! Burrow API client subsystem.
//!
//! # Data Flow
//! ```text
//! Burrow HTTP API (v3)
//!     → client.rs (reqwest calls, per-request timeout)
//!     → types.rs (wire envelopes → domain types)
//!     → LagSource trait consumed by the scrape engine
//! ```
//!
//! # Design Decisions
//! - The scrape engine depends on the `LagSource` trait, not on the HTTP
//!   client, so tests can substitute an in-memory source
//! - Every upstream failure (transport, non-2xx, error envelope, malformed
//!   payload) collapses into one `BurrowError` — callers do not distinguish
//! - No retries: a failed call is simply reattempted on the next cycle

pub mod client;
pub mod types;

use std::future::Future;

pub use client::BurrowClient;
pub use types::{BurrowError, GroupStatus, PartitionLag};

/// Source of consumer-lag data for the scrape engine.
///
/// Mirrors the three Burrow API calls the exporter makes. All methods are
/// fallible; the scrape engine handles failures at the level they occur and
/// never propagates them upward.
pub trait LagSource: Send + Sync + 'static {
    /// List the Kafka clusters Burrow is tracking.
    fn list_clusters(&self) -> impl Future<Output = Result<Vec<String>, BurrowError>> + Send;

    /// List the consumer groups in one cluster.
    fn list_consumer_groups(
        &self,
        cluster: &str,
    ) -> impl Future<Output = Result<Vec<String>, BurrowError>> + Send;

    /// Fetch the lag status of one consumer group.
    fn group_lag(
        &self,
        cluster: &str,
        group: &str,
    ) -> impl Future<Output = Result<GroupStatus, BurrowError>> + Send;
}
