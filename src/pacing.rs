//! Pacing of the dealer's visible steps.

use core::future::Future;
use core::time::Duration;

/// Clock used to pause between the dealer's narrated steps.
pub trait Pacer {
    /// Suspends for `duration`.
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()>;
}

/// Returns immediately. Used for tests and headless play.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    async fn pause(&mut self, _duration: Duration) {}
}

/// Real-time pacing on the tokio timer.
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[cfg(feature = "tokio")]
impl Pacer for TokioPacer {
    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
