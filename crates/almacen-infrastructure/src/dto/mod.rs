//! Data transfer objects for persistence.

pub mod stock_record;

pub use stock_record::{StockRecordDto, inventory_from_documents, record_name};
