//! Request pacing
//!
//! The walk pauses between pages and the transport pauses between retries.
//! Both draw their pause from a [`Pacer`], so tests can swap in [`NoDelay`].

use crate::config::{CrawlerConfig, FetchConfig};
use rand::Rng;
use std::time::Duration;

/// Source of pauses between consecutive requests
pub trait Pacer {
    /// Returns how long to wait before the next request
    fn next_delay(&mut self) -> Duration;
}

/// Uniformly random pause from a closed millisecond range
#[derive(Debug, Clone)]
pub struct RandomPacer {
    min_ms: u64,
    max_ms: u64,
}

impl RandomPacer {
    /// Creates a pacer; the bounds are swapped if given in the wrong order
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// Pacer for the pause between listing pages
    pub fn between_pages(config: &CrawlerConfig) -> Self {
        Self::new(config.page_delay_min_ms, config.page_delay_max_ms)
    }

    /// Pacer for the pause between fetch attempts
    pub fn between_retries(config: &FetchConfig) -> Self {
        Self::new(config.retry_delay_min_ms, config.retry_delay_max_ms)
    }
}

impl Pacer for RandomPacer {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Sleeps for the pacer's next delay
pub(crate) async fn wait<P: Pacer>(pacer: &mut P) {
    let delay = pacer.next_delay();
    if !delay.is_zero() {
        tracing::debug!("Pausing {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}
