//! Domain layer of the Almacén inventory bot.
//!
//! Everything here is free of I/O: the static catalog, the stock records
//! and their mutation rules, the item-name codec, the action-identifier
//! grammar with the navigation state machine, and the traits that the
//! infrastructure layer implements for persistence.

pub mod catalog;
pub mod codec;
pub mod command;
pub mod community;
pub mod config;
pub mod error;
pub mod inventory;
pub mod navigation;

// Re-export common error type
pub use error::AlmacenError;

pub use community::{CommunityId, UserId};
