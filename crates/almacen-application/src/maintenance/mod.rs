//! Background maintenance tasks.
//!
//! Each task runs on its own interval until the shared
//! [`CancellationToken`] is cancelled. Failures are logged and the loop
//! keeps going.

pub mod activity_probe;
pub mod autosave;
pub mod session_sweep;

use std::sync::Arc;

use almacen_core::config::MaintenanceConfig;
use almacen_core::navigation::SessionStore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::activity::ActivityTracker;
use crate::inventory_cache::InventoryCache;

pub use activity_probe::{KEEPALIVE_MESSAGES, KeepAliveNotifier, spawn_activity_probe};
pub use autosave::spawn_autosave;
pub use session_sweep::spawn_session_sweep;

/// Handles of the running maintenance tasks.
pub struct MaintenanceTasks {
    token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl MaintenanceTasks {
    /// Spawns autosave, session sweep and activity probe.
    pub fn spawn(
        config: &MaintenanceConfig,
        cache: Arc<InventoryCache>,
        sessions: Arc<dyn SessionStore>,
        activity: Arc<ActivityTracker>,
        notifier: Arc<dyn KeepAliveNotifier>,
    ) -> Self {
        let token = CancellationToken::new();
        let handles = vec![
            spawn_autosave(cache, config.autosave_interval, token.clone()),
            spawn_session_sweep(
                sessions,
                config.session_ttl,
                config.session_sweep_interval,
                token.clone(),
            ),
            spawn_activity_probe(activity, notifier, config, token.clone()),
        ];
        tracing::info!(tasks = handles.len(), "Maintenance tasks started");
        Self { token, handles }
    }

    /// Cancels every task and waits for them to stop.
    pub async fn shutdown(self) {
        self.token.cancel();
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Maintenance task ended abnormally");
            }
        }
    }
}

/// Interval whose first tick fires one full `period` from now.
pub(crate) fn delayed_interval(period: std::time::Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker
}
