use std::sync::Arc;
use std::time::Duration;

use almacen_core::config::MaintenanceConfig;
use almacen_core::error::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::activity::ActivityTracker;
use crate::render;
use crate::view::View;

use super::delayed_interval;

/// Lines picked at random for the keep-alive notice.
pub const KEEPALIVE_MESSAGES: [&str; 8] = [
    "🔧 Sistema activo - Inventario sincronizado",
    "📊 Verificando stock automáticamente...",
    "⚡ Bot en línea - Listo para operaciones",
    "🎮 Servidor GTA RP - Sistema funcionando",
    "💾 Respaldo automático completado",
    "🔄 Refrescando conexión con base de datos",
    "📡 Manteniendo conexión activa...",
    "🛡️ Sistema de seguridad verificado",
];

/// Delivers keep-alive notices to the chat platform.
#[async_trait]
pub trait KeepAliveNotifier: Send + Sync {
    /// Posts `view` to the notification channel and deletes it after `ttl`.
    ///
    /// Returns `Ok(false)` when no channel is available.
    async fn notify(&self, view: View, ttl: Duration) -> Result<bool>;
}

/// Checks for inactivity every `activity_check_interval` and sends a
/// keep-alive notice once `idle_threshold` has passed without activity.
pub fn spawn_activity_probe(
    activity: Arc<ActivityTracker>,
    notifier: Arc<dyn KeepAliveNotifier>,
    config: &MaintenanceConfig,
    token: CancellationToken,
) -> JoinHandle<()> {
    let period = config.activity_check_interval;
    let idle_threshold = config.idle_threshold;
    let ttl = config.keepalive_ttl;
    tokio::spawn(async move {
        let mut ticker = delayed_interval(period);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            probe_once(&activity, notifier.as_ref(), idle_threshold, ttl).await;
        }
        tracing::debug!("Activity probe stopped");
    })
}

/// Runs one inactivity check. Returns whether a notice was sent.
pub(crate) async fn probe_once(
    activity: &ActivityTracker,
    notifier: &dyn KeepAliveNotifier,
    idle_threshold: Duration,
    ttl: Duration,
) -> bool {
    if activity.idle_for(Instant::now()) < idle_threshold {
        return false;
    }

    let message = KEEPALIVE_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(KEEPALIVE_MESSAGES[0]);
    let refresh = activity.next_refresh();
    let uptime_minutes = activity.uptime().as_secs() / 60;
    let view = render::keepalive(message, uptime_minutes, refresh);

    // Recorded even when delivery fails: at most one attempt per idle window.
    activity.record();
    match notifier.notify(view, ttl).await {
        Ok(true) => {
            tracing::info!(refresh, "Keep-alive notice sent");
            true
        }
        Ok(false) => {
            tracing::debug!("No notification channel available");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to send keep-alive notice");
            false
        }
    }
}
