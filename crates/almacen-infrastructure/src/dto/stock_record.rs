//! Persisted shape of a stock record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use almacen_core::CommunityId;
use almacen_core::inventory::{Inventory, StockEntry};

/// Stored key of the item name. Existing tables are keyed on it.
pub const NAME_FIELD: &str = "nombre";
pub const QUANTITY_FIELD: &str = "cantidad";
pub const PRICE_FIELD: &str = "precio";
pub const UPDATED_FIELD: &str = "ultimaActualizacion";
pub const COMMUNITY_FIELD: &str = "guildId";

/// English keys accepted on read for records written with them.
const NAME_ALIASES: [&str; 2] = [NAME_FIELD, "name"];
const QUANTITY_ALIASES: [&str; 2] = [QUANTITY_FIELD, "quantity"];
const PRICE_ALIASES: [&str; 2] = [PRICE_FIELD, "unitPrice"];

/// One stored record: name, quantity, unit price, last update and owning
/// community, persisted under the keys of the existing inventory tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecordDto {
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: u64,
    #[serde(rename = "precio", alias = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "ultimaActualizacion", alias = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
    #[serde(rename = "guildId", alias = "community")]
    pub community: String,
}

impl StockRecordDto {
    pub fn new(
        community: CommunityId,
        name: &str,
        entry: &StockEntry,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.to_string(),
            quantity: entry.quantity,
            unit_price: entry.unit_price,
            last_updated,
            community: community.to_string(),
        }
    }

    /// Builds one DTO per record of `inventory`, all stamped with `now`.
    pub fn from_inventory(
        community: CommunityId,
        inventory: &Inventory,
        now: DateTime<Utc>,
    ) -> Vec<Self> {
        inventory
            .iter()
            .map(|(name, entry)| Self::new(community, name, entry, now))
            .collect()
    }

    /// Reads a stored document leniently.
    ///
    /// Documents without a string name are rejected. Numeric fields that
    /// are missing, non-numeric, negative or non-finite become 0; numeric
    /// strings are accepted.
    pub fn parse_entry(document: &Value) -> Option<(String, StockEntry)> {
        let name = record_name(document)?.to_string();
        let quantity = coerce_non_negative(field(document, &QUANTITY_ALIASES)).trunc() as u64;
        let unit_price = coerce_non_negative(field(document, &PRICE_ALIASES));
        Some((name, StockEntry::new(quantity, unit_price)))
    }
}

/// The item name of a stored document, under either key.
pub fn record_name(document: &Value) -> Option<&str> {
    field(document, &NAME_ALIASES)?.as_str()
}

fn field<'a>(document: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| document.get(*key))
}

/// Collects the readable documents of a table into an inventory.
pub fn inventory_from_documents<'a>(documents: impl IntoIterator<Item = &'a Value>) -> Inventory {
    documents
        .into_iter()
        .filter_map(StockRecordDto::parse_entry)
        .collect()
}

fn coerce_non_negative(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() && number > 0.0 {
        number
    } else {
        0.0
    }
}
