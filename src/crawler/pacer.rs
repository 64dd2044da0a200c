//! Inter-page delay

use std::time::Duration;

/// Waits between page fetches
#[allow(async_fn_in_trait)]
pub trait Pacer {
    /// Pauses for `interval` before the next page is requested
    async fn pause(&mut self, interval: Duration);
}

/// Pacer that sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&mut self, interval: Duration) {
        tracing::debug!("Waiting {:?} before the next page", interval);
        tokio::time::sleep(interval).await;
    }
}
