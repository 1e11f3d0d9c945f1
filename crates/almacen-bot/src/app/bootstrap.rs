use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use almacen_application::{
    ActivityTracker, CommandUseCase, InteractionUseCase, InventoryCache, InventoryService,
};
use almacen_core::config::BotConfig;
use almacen_core::inventory::InventoryRepository;
use almacen_core::navigation::SessionStore;
use almacen_infrastructure::{InMemorySessionStore, connect_inventory_repository};
use anyhow::{Context, Result};

use crate::app::AppState;

pub struct AppBootstrap {
    pub app_state: Arc<AppState>,
}

/// Composition root: opens the record store and wires every use case.
pub async fn bootstrap(config: BotConfig) -> Result<AppBootstrap> {
    let inventory_repository: Arc<dyn InventoryRepository> =
        connect_inventory_repository(&config.store, &config.database_prefix)
            .await
            .context("Failed to connect to the record store")?;
    tracing::info!(config = ?config, "[Bootstrap] Record store connected");

    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let inventory_cache = Arc::new(InventoryCache::new(inventory_repository));
    let inventory_service = InventoryService::new(inventory_cache.clone());
    let activity = Arc::new(ActivityTracker::new());

    let interaction_usecase = Arc::new(InteractionUseCase::new(
        inventory_service.clone(),
        session_store.clone(),
        activity.clone(),
    ));
    let command_usecase = Arc::new(CommandUseCase::new(
        inventory_service.clone(),
        session_store.clone(),
        activity.clone(),
    ));

    let app_state = AppState {
        config,
        session_store,
        inventory_cache,
        inventory_service,
        interaction_usecase,
        command_usecase,
        activity,
        connected: Arc::new(AtomicBool::new(false)),
    };
    tracing::info!("[Bootstrap] Application state ready");

    Ok(AppBootstrap {
        app_state: Arc::new(app_state),
    })
}
