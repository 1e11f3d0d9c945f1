use std::sync::Arc;
use std::time::Duration;

use almacen_core::navigation::SessionStore;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::delayed_interval;

/// Purges sessions idle for at least `ttl`, checking every `period`.
pub fn spawn_session_sweep(
    sessions: Arc<dyn SessionStore>,
    ttl: Duration,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    let ttl = chrono::Duration::seconds(ttl.as_secs() as i64);
    tokio::spawn(async move {
        let mut ticker = delayed_interval(period);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let purged = sessions.purge_idle(Utc::now(), ttl).await;
            if purged > 0 {
                let remaining = sessions.len().await;
                tracing::info!(purged, remaining, "Expired navigation sessions purged");
            }
        }
        tracing::debug!("Session sweep stopped");
    })
}
