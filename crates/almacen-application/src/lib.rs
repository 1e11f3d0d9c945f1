//! Application layer for Almacén.
//!
//! Use cases that coordinate the domain rules with the record store and the
//! session store: the write-through inventory cache, interaction and text
//! command routing, screen rendering into a platform-neutral view model,
//! and the background maintenance tasks.

pub mod activity;
pub mod command_usecase;
pub mod interaction_usecase;
pub mod inventory_cache;
pub mod inventory_service;
pub mod maintenance;
pub mod render;
pub mod view;

pub use activity::ActivityTracker;
pub use command_usecase::{CommandResponse, CommandUseCase};
pub use interaction_usecase::{InteractionContext, InteractionUseCase};
pub use inventory_cache::{FlushReport, InventoryCache};
pub use inventory_service::InventoryService;
pub use view::{Button, ButtonStyle, PriceForm, Reply, View};
