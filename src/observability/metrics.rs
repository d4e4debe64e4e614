//! Metric sink and Prometheus exposition.
//!
//! # Responsibilities
//! - Define the four consumer-lag gauge families
//! - Expose a Prometheus-compatible `/metrics` endpoint
//! - Track exporter self-metrics (cycle duration, up)
//!
//! # Metrics
//! - `consumer_partition_lag` (gauge): lag at partition end, by
//!   cluster/group/topic/partition
//! - `consumer_partition_current_offset` (gauge): committed offset
//! - `consumer_partition_max_offset` (gauge): log-end offset
//! - `consumer_total_lag` (gauge): sum of lag across the group, by
//!   cluster/group
//!
//! # Design Decisions
//! - Every write is an independent last-write-wins overwrite; concurrent
//!   group processors need no caller-side locking
//! - Series are never deleted; a group that stops reporting keeps its
//!   last-known values on the endpoint

use axum::routing::get;
use axum::Router;
use metrics::{describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::burrow::PartitionLag;

pub const PARTITION_LAG: &str = "consumer_partition_lag";
pub const PARTITION_CURRENT_OFFSET: &str = "consumer_partition_current_offset";
pub const PARTITION_MAX_OFFSET: &str = "consumer_partition_max_offset";
pub const TOTAL_LAG: &str = "consumer_total_lag";

const SCRAPE_DURATION: &str = "lag_exporter_scrape_duration_seconds";
const SCRAPE_UP: &str = "lag_exporter_up";

/// Destination for consumer-lag gauge updates.
///
/// Implementations must be safe for unbounded concurrent callers; every
/// update is an idempotent overwrite keyed by its full label tuple.
pub trait LagSink: Send + Sync + 'static {
    /// Set the three per-partition gauges for one partition.
    fn record_partition(&self, cluster: &str, group: &str, partition: &PartitionLag);

    /// Set the group-level total-lag gauge.
    fn record_total_lag(&self, cluster: &str, group: &str, total_lag: i64);
}

/// `LagSink` backed by the process-wide Prometheus recorder.
#[derive(Debug, Default)]
pub struct PrometheusSink;

impl PrometheusSink {
    pub fn new() -> Self {
        Self
    }
}

impl LagSink for PrometheusSink {
    fn record_partition(&self, cluster: &str, group: &str, partition: &PartitionLag) {
        let labels = [
            ("cluster", cluster.to_string()),
            ("group", group.to_string()),
            ("topic", partition.topic.clone()),
            ("partition", partition.partition.to_string()),
        ];
        gauge!(PARTITION_LAG, &labels).set(partition.lag as f64);
        gauge!(PARTITION_CURRENT_OFFSET, &labels).set(partition.offset as f64);
        gauge!(PARTITION_MAX_OFFSET, &labels).set(partition.max_offset as f64);
    }

    fn record_total_lag(&self, cluster: &str, group: &str, total_lag: i64) {
        let labels = [
            ("cluster", cluster.to_string()),
            ("group", group.to_string()),
        ];
        gauge!(TOTAL_LAG, &labels).set(total_lag as f64);
    }
}

/// Record the outcome of one scrape cycle.
pub fn record_cycle(duration_secs: f64, listed_clusters: bool) {
    histogram!(SCRAPE_DURATION).record(duration_secs);
    gauge!(SCRAPE_UP).set(if listed_clusters { 1.0 } else { 0.0 });
}

/// Install the Prometheus recorder and register metric descriptions.
///
/// Returns the handle the exposition endpoint renders from. Must be called
/// once, before any gauge is written.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

/// Register help text for all metric families.
pub fn describe_metrics() {
    describe_gauge!(PARTITION_LAG, "Lag of a consumer group at partition end");
    describe_gauge!(
        PARTITION_CURRENT_OFFSET,
        "Committed offset of a consumer group for a partition"
    );
    describe_gauge!(PARTITION_MAX_OFFSET, "Log-end offset of a partition");
    describe_gauge!(
        TOTAL_LAG,
        "Sum of lag across all partitions of a consumer group"
    );
    describe_histogram!(SCRAPE_DURATION, "Duration of one full scrape cycle");
    describe_gauge!(
        SCRAPE_UP,
        "1 if the last cluster listing succeeded, 0 otherwise"
    );
}

/// Build the exposition router.
///
/// The router owns nothing but the render handle; it is constructed
/// explicitly by the process rather than registered into any global server
/// state.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route(
            "/metrics",
            get(move || std::future::ready(handle.render())),
        )
        .layer(TraceLayer::new_for_http())
}

/// Serve the exposition endpoint until the shutdown signal fires.
pub async fn serve(
    listener: TcpListener,
    handle: PrometheusHandle,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let app = router(handle);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
}
