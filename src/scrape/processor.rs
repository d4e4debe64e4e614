//! Cluster and group processors.
//!
//! # Responsibilities
//! - Fan one task out per cluster, and one per consumer group within it
//! - Join every dispatched task before the cycle is considered complete
//! - Isolate upstream failures to the exact level they occur

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::burrow::{GroupStatus, LagSource};
use crate::config::ScrapeConfig;
use crate::observability::metrics::LagSink;

/// Concurrency bounds shared by every cycle.
///
/// The group semaphore is global across clusters so a single cluster with
/// thousands of groups cannot monopolize the process.
pub(crate) struct FanoutLimits {
    clusters: Arc<Semaphore>,
    groups: Arc<Semaphore>,
}

impl FanoutLimits {
    pub(crate) fn new(config: &ScrapeConfig) -> Self {
        Self {
            clusters: Arc::new(Semaphore::new(config.max_concurrent_clusters)),
            groups: Arc::new(Semaphore::new(config.max_concurrent_groups)),
        }
    }
}

/// Run one full scrape cycle.
///
/// Returns whether the cluster listing succeeded. On listing failure the
/// whole cycle is skipped and no metric is touched. Otherwise every cluster
/// is dispatched concurrently and the call returns only after all of them
/// (and transitively all their groups) have finished.
pub(crate) async fn run_cycle<C, S>(client: &Arc<C>, sink: &Arc<S>, limits: &FanoutLimits) -> bool
where
    C: LagSource,
    S: LagSink,
{
    let clusters = match client.list_clusters().await {
        Ok(clusters) => clusters,
        Err(e) => {
            tracing::error!(error = %e, "error listing clusters, skipping cycle");
            return false;
        }
    };

    let mut tasks = JoinSet::new();
    for cluster in clusters {
        let client = Arc::clone(client);
        let sink = Arc::clone(sink);
        let cluster_slots = Arc::clone(&limits.clusters);
        let group_slots = Arc::clone(&limits.groups);

        tasks.spawn(async move {
            // Fails only if the semaphore is closed, which never happens.
            let Ok(_slot) = cluster_slots.acquire().await else {
                return;
            };
            process_cluster(client, sink, cluster, group_slots).await;
        });
    }

    // Cycle barrier: panicked children surface via join_next but do not
    // stop the remaining siblings from draining.
    while tasks.join_next().await.is_some() {}
    true
}

/// Process one cluster: list its consumer groups and fan out per group.
///
/// A listing failure is logged and confined to this cluster; siblings in
/// the same cycle are unaffected.
async fn process_cluster<C, S>(
    client: Arc<C>,
    sink: Arc<S>,
    cluster: String,
    group_slots: Arc<Semaphore>,
) where
    C: LagSource,
    S: LagSink,
{
    let groups = match client.list_consumer_groups(&cluster).await {
        Ok(groups) => groups,
        Err(e) => {
            tracing::error!(cluster = %cluster, error = %e, "error listing consumer groups, skipping cluster");
            return;
        }
    };

    let mut tasks = JoinSet::new();
    for group in groups {
        let client = Arc::clone(&client);
        let sink = Arc::clone(&sink);
        let slots = Arc::clone(&group_slots);
        let cluster = cluster.clone();

        tasks.spawn(async move {
            let Ok(_slot) = slots.acquire().await else {
                return;
            };
            process_group(client.as_ref(), sink.as_ref(), &cluster, &group).await;
        });
    }

    while tasks.join_next().await.is_some() {}
}

/// Process one consumer group: fetch its lag status and update gauges.
///
/// A fetch failure leaves the group's previously exposed values untouched
/// (stale but present).
async fn process_group<C, S>(client: &C, sink: &S, cluster: &str, group: &str)
where
    C: LagSource,
    S: LagSink,
{
    let status = match client.group_lag(cluster, group).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(cluster, group, error = %e, "error fetching consumer group lag, keeping previous values");
            return;
        }
    };
    apply_status(sink, &status);
}

/// Write one group's status to the sink.
///
/// Each write is an independent overwrite; there is no multi-metric
/// transaction, so a reader may observe a partially updated group
/// mid-cycle.
pub(crate) fn apply_status<S: LagSink>(sink: &S, status: &GroupStatus) {
    for partition in &status.partitions {
        sink.record_partition(&status.cluster, &status.group, partition);
    }
    sink.record_total_lag(&status.cluster, &status.group, status.total_lag);
}
