//! Inventory domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog;

/// Quantities below this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u64 = 10;

/// Stock direction selected on the product screen.
///
/// The string form (`add` / `remove`) is the segment used in `op_` and
/// `qty_` action identifiers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StockOperation {
    Add,
    Remove,
}

/// Quantity and unit price of one item in one community.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub quantity: u64,
    pub unit_price: f64,
}

impl StockEntry {
    pub fn new(quantity: u64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// Stock value at the current unit price.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    pub fn level(&self) -> StockLevel {
        StockLevel::of(self.quantity)
    }
}

/// Traffic-light classification of a stock quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Empty,
    Low,
    Normal,
}

impl StockLevel {
    pub fn of(quantity: u64) -> Self {
        if quantity == 0 {
            StockLevel::Empty
        } else if quantity < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            StockLevel::Empty => "🔴",
            StockLevel::Low => "🟡",
            StockLevel::Normal => "🟢",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockLevel::Empty => "🔴 Agotado",
            StockLevel::Low => "🟡 Stock Bajo",
            StockLevel::Normal => "🟢 Stock Normal",
        }
    }
}

/// All stock records of one community, keyed by item name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: BTreeMap<String, StockEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the record for `name`.
    pub fn get(&self, name: &str) -> Option<&StockEntry> {
        self.entries.get(name)
    }

    /// The record for `name`, or an empty record when absent.
    pub fn entry_or_default(&self, name: &str) -> StockEntry {
        self.get(name).copied().unwrap_or_default()
    }

    pub(crate) fn entry_mut(&mut self, name: &str) -> &mut StockEntry {
        self.entries.entry(name.to_string()).or_default()
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, name: impl Into<String>, entry: StockEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StockEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Inserts every catalog item that has no record yet at {0, 0}.
    ///
    /// Existing records are never touched. Returns the number of records
    /// inserted, so a second call always returns 0.
    pub fn seed_missing(&mut self) -> usize {
        let mut inserted = 0;
        for item in catalog::all_items() {
            if !self.entries.contains_key(item.name) {
                self.entries.insert(item.name.to_string(), StockEntry::default());
                inserted += 1;
            }
        }
        inserted
    }

    /// Sum of quantity × unit price over the catalog items.
    ///
    /// Records for names outside the catalog are kept in storage but not
    /// counted.
    pub fn total_value(&self) -> f64 {
        catalog::all_items()
            .iter()
            .map(|item| self.entry_or_default(item.name).value())
            .sum()
    }
}

impl FromIterator<(String, StockEntry)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, StockEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
