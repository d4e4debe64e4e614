//! Scrape scheduling and lifecycle.
//!
//! # Responsibilities
//! - Fire a scrape cycle on a fixed interval
//! - Hold the next tick until the previous cycle has fully drained
//! - Observe the shutdown signal only between cycles

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::burrow::LagSource;
use crate::config::ScrapeConfig;
use crate::observability::metrics::{self, LagSink};
use crate::scrape::processor::{run_cycle, FanoutLimits};

/// Fixed-interval scrape scheduler.
///
/// Loops Idle → Scraping → Idle until shutdown is observed while Idle. A
/// signal that arrives mid-cycle takes effect only after the cycle's
/// barrier drains, so awaiting the scraper task gives callers the drain
/// guarantee.
pub struct Scraper<C, S> {
    client: Arc<C>,
    sink: Arc<S>,
    config: ScrapeConfig,
}

impl<C, S> Scraper<C, S>
where
    C: LagSource,
    S: LagSink,
{
    pub fn new(client: Arc<C>, sink: Arc<S>, config: ScrapeConfig) -> Self {
        Self {
            client,
            sink,
            config,
        }
    }

    /// Run scrape cycles until the shutdown signal is observed.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let period = Duration::from_secs(self.config.interval_secs);
        let limits = FanoutLimits::new(&self.config);

        // First cycle fires one full period after start; a cycle that
        // overruns its period delays the next tick instead of bursting.
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval_secs,
            "scrape scheduler starting"
        );

        loop {
            // Shutdown wins when both are ready, so a signal that arrived
            // during the previous cycle is honored before the next tick.
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("scrape scheduler received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    tracing::info!("scraping burrow");
                    let started = Instant::now();
                    let listed = run_cycle(&self.client, &self.sink, &limits).await;
                    let elapsed = started.elapsed();
                    metrics::record_cycle(elapsed.as_secs_f64(), listed);
                    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "finished scraping burrow");
                }
            }
        }
    }
}
