//! Periodic eviction of expired analysis cache entries.
//!
//! Reads already treat expired entries as misses; this loop reclaims the
//! memory held by keys nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tonematch_core::cache::TtlCache;

/// How often the purge runs.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Run the purge loop until `cancel` is triggered.
pub async fn run<V>(cache: Arc<TtlCache<V>>, interval: Duration, cancel: CancellationToken)
where
    V: Clone + Send + Sync + 'static,
{
    tracing::info!(interval_secs = interval.as_secs(), "Cache purge job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cache purge job stopping");
                break;
            }
            _ = ticker.tick() => {
                let purged = cache.purge_expired().await;
                if purged > 0 {
                    tracing::info!(purged, "Cache purge: evicted expired entries");
                } else {
                    tracing::debug!("Cache purge: nothing expired");
                }
            }
        }
    }
}
