use async_trait::async_trait;
use std::time::Duration;

/// Pacing policy between consecutive remote calls.
///
/// The runner calls `pause` before every call except the first of the run;
/// swapping in `NoopPacer` gives tests full speed without touching the
/// pipeline.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed sleep between calls. No backoff, no jitter; the point is just to
/// stay under the remote service's abuse detection.
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No pacing at all.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
