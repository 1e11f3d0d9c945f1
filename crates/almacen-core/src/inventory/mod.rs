//! Per-community stock records, the mutation engine and the store trait.

pub mod model;
pub mod mutation;
pub mod repository;

pub use model::{Inventory, LOW_STOCK_THRESHOLD, StockEntry, StockLevel, StockOperation};
pub use mutation::{Mutation, MutationOutcome, parse_amount, parse_price};
pub use repository::InventoryRepository;
