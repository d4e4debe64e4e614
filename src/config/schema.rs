//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! exporter. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExporterConfig {
    /// Upstream Burrow API settings.
    pub burrow: BurrowConfig,

    /// Scrape scheduling and fan-out settings.
    pub scrape: ScrapeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Upstream Burrow API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BurrowConfig {
    /// Base URL of the Burrow HTTP API (e.g., "http://localhost:8000").
    pub base_url: String,

    /// Per-request timeout in seconds for Burrow API calls.
    ///
    /// Bounds how long a single listing or lag fetch can stall its scrape
    /// cycle.
    pub api_timeout_secs: u64,
}

impl Default for BurrowConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_timeout_secs: 10,
        }
    }
}

/// Scrape scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Scrape interval in seconds. A new cycle never starts before the
    /// previous one has fully drained.
    pub interval_secs: u64,

    /// Maximum number of clusters processed concurrently per cycle.
    pub max_concurrent_clusters: usize,

    /// Maximum number of consumer groups fetched concurrently per cycle,
    /// across all clusters.
    pub max_concurrent_groups: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            max_concurrent_clusters: 4,
            max_concurrent_groups: 32,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
