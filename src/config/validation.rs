//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, concurrency bounds > 0)
//! - Check that addresses and URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ExporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ExporterConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBurrowUrl(String),
    ZeroInterval,
    ZeroApiTimeout,
    ZeroConcurrency(&'static str),
    InvalidMetricsAddress(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBurrowUrl(url) => {
                write!(f, "burrow.base_url '{}' is not a valid http(s) URL", url)
            }
            ValidationError::ZeroInterval => {
                write!(f, "scrape.interval_secs must be greater than zero")
            }
            ValidationError::ZeroApiTimeout => {
                write!(f, "burrow.api_timeout_secs must be greater than zero")
            }
            ValidationError::ZeroConcurrency(field) => {
                write!(f, "{} must be greater than zero", field)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(
                    f,
                    "observability.metrics_address '{}' is not a valid socket address",
                    addr
                )
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.burrow.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidBurrowUrl(
            config.burrow.base_url.clone(),
        )),
    }

    if config.scrape.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.burrow.api_timeout_secs == 0 {
        errors.push(ValidationError::ZeroApiTimeout);
    }
    if config.scrape.max_concurrent_clusters == 0 {
        errors.push(ValidationError::ZeroConcurrency(
            "scrape.max_concurrent_clusters",
        ));
    }
    if config.scrape.max_concurrent_groups == 0 {
        errors.push(ValidationError::ZeroConcurrency(
            "scrape.max_concurrent_groups",
        ));
    }
    if config
        .observability
        .metrics_address
        .parse::<SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
