//! Record store selection.

use std::sync::Arc;

use almacen_core::config::StoreBackend;
use almacen_core::error::Result;
use almacen_core::inventory::InventoryRepository;

use crate::async_dir_inventory_repository::AsyncDirInventoryRepository;
use crate::mongo_inventory_repository::MongoInventoryRepository;

/// Opens the record store named by `backend` and checks it is reachable.
pub async fn connect_inventory_repository(
    backend: &StoreBackend,
    prefix: &str,
) -> Result<Arc<dyn InventoryRepository>> {
    let repository: Arc<dyn InventoryRepository> = match backend {
        StoreBackend::Mongo { uri } => {
            Arc::new(MongoInventoryRepository::connect(uri, prefix).await?)
        }
        StoreBackend::JsonDir { path } => {
            Arc::new(AsyncDirInventoryRepository::new(path.clone(), prefix).await?)
        }
    };
    repository.ping().await?;
    Ok(repository)
}
