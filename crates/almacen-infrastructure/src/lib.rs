pub mod async_dir_inventory_repository;
pub mod config_service;
pub mod dto;
pub mod in_memory_session_store;
pub mod mongo_inventory_repository;
pub mod repository;
pub mod storage;

pub use crate::async_dir_inventory_repository::AsyncDirInventoryRepository;
pub use crate::config_service::ConfigService;
pub use crate::in_memory_session_store::InMemorySessionStore;
pub use crate::mongo_inventory_repository::MongoInventoryRepository;
pub use crate::repository::connect_inventory_repository;
