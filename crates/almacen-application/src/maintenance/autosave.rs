use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::inventory_cache::InventoryCache;

use super::delayed_interval;

/// Re-persists every cached community each `period`, whether or not it changed.
pub fn spawn_autosave(
    cache: Arc<InventoryCache>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = delayed_interval(period);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let report = cache.flush_all().await;
            if report.failed > 0 {
                tracing::warn!(saved = report.saved, failed = report.failed, "Autosave incomplete");
            } else {
                tracing::debug!(saved = report.saved, "Autosave completed");
            }
        }
        tracing::debug!("Autosave stopped");
    })
}
