//! Burrow HTTP client with timeout and error handling.
//!
//! # Responsibilities
//! - Query the Burrow v3 REST API (clusters, consumers, lag)
//! - Apply a per-request timeout so a hung call cannot stall future cycles
//! - Map transport errors, non-2xx statuses, and Burrow error envelopes
//!   into `BurrowError`

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::burrow::types::{
    BurrowError, ClusterListResponse, ConsumerListResponse, GroupLagResponse, GroupStatus,
};
use crate::burrow::LagSource;
use crate::config::BurrowConfig;

/// HTTP client for the Burrow v3 API.
pub struct BurrowClient {
    http: reqwest::Client,
    base_url: String,
}

impl BurrowClient {
    /// Create a new client from configuration.
    pub fn new(config: &BurrowConfig) -> Result<Self, BurrowError> {
        // Parse up front so a bad URL fails at startup, not mid-cycle.
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, BurrowError> {
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BurrowError::Status { status, url });
        }
        Ok(resp.json::<T>().await?)
    }
}

impl LagSource for BurrowClient {
    async fn list_clusters(&self) -> Result<Vec<String>, BurrowError> {
        let url = format!("{}/v3/kafka", self.base_url);
        let body: ClusterListResponse = self.get_json(url).await?;
        if body.error {
            return Err(BurrowError::Api(body.message));
        }
        Ok(body.clusters)
    }

    async fn list_consumer_groups(&self, cluster: &str) -> Result<Vec<String>, BurrowError> {
        let url = format!("{}/v3/kafka/{}/consumer", self.base_url, cluster);
        let body: ConsumerListResponse = self.get_json(url).await?;
        if body.error {
            return Err(BurrowError::Api(body.message));
        }
        Ok(body.consumers)
    }

    async fn group_lag(&self, cluster: &str, group: &str) -> Result<GroupStatus, BurrowError> {
        let url = format!("{}/v3/kafka/{}/consumer/{}/lag", self.base_url, cluster, group);
        let body: GroupLagResponse = self.get_json(url).await?;
        if body.error {
            return Err(BurrowError::Api(body.message));
        }
        body.status
            .map(GroupStatus::from)
            .ok_or_else(|| BurrowError::Api("lag response missing status".to_string()))
    }
}

impl std::fmt::Debug for BurrowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurrowClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
