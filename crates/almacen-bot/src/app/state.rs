use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use almacen_application::{
    ActivityTracker, CommandUseCase, InteractionUseCase, InventoryCache, InventoryService,
};
use almacen_core::config::BotConfig;
use almacen_core::navigation::SessionStore;

/// Application state shared by the gateway handler, the health endpoint
/// and the maintenance tasks.
pub struct AppState {
    pub config: BotConfig,
    pub session_store: Arc<dyn SessionStore>,
    pub inventory_cache: Arc<InventoryCache>,
    pub inventory_service: InventoryService,
    pub interaction_usecase: Arc<InteractionUseCase>,
    pub command_usecase: Arc<CommandUseCase>,
    pub activity: Arc<ActivityTracker>,
    /// Set once the gateway reports ready.
    pub connected: Arc<AtomicBool>,
}

impl AppState {
    pub fn mark_connected(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }
}
