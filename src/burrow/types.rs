//! Burrow wire formats and the exporter's domain types.

use serde::Deserialize;
use thiserror::Error;

/// Error type for upstream Burrow calls.
///
/// One class covers transport errors, non-success statuses, Burrow error
/// envelopes, and malformed payloads. The scrape engine treats them all the
/// same way: log and move on.
#[derive(Debug, Error)]
pub enum BurrowError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("burrow reported an error: {0}")]
    Api(String),

    #[error("invalid burrow base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Lag status of one consumer group, as the scrape engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStatus {
    pub cluster: String,
    pub group: String,
    /// Sum of lag across the group's partitions, as computed by Burrow.
    /// Independent of how many partition entries are present.
    pub total_lag: i64,
    pub partitions: Vec<PartitionLag>,
}

/// Lag state of one partition within a consumer group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionLag {
    pub topic: String,
    pub partition: i32,
    pub lag: i64,
    pub offset: i64,
    pub max_offset: i64,
}

// Burrow v3 wire envelopes. Every response carries an `error` flag and a
// `message` alongside the payload.

#[derive(Debug, Deserialize)]
pub(crate) struct ClusterListResponse {
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub clusters: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConsumerListResponse {
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub consumers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupLagResponse {
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub status: Option<WireGroupStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireGroupStatus {
    pub cluster: String,
    pub group: String,
    #[serde(rename = "totallag")]
    pub total_lag: i64,
    #[serde(default)]
    pub partitions: Vec<WirePartition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePartition {
    pub topic: String,
    pub partition: i32,
    pub end: WireOffsets,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireOffsets {
    pub offset: i64,
    pub lag: i64,
    #[serde(default)]
    pub max_offset: i64,
}

impl From<WireGroupStatus> for GroupStatus {
    fn from(wire: WireGroupStatus) -> Self {
        GroupStatus {
            cluster: wire.cluster,
            group: wire.group,
            total_lag: wire.total_lag,
            partitions: wire
                .partitions
                .into_iter()
                .map(|p| PartitionLag {
                    topic: p.topic,
                    partition: p.partition,
                    lag: p.end.lag,
                    offset: p.end.offset,
                    max_offset: p.end.max_offset,
                })
                .collect(),
        }
    }
}
