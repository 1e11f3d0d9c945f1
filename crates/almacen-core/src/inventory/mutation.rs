//! Stock mutations and their validation.
//!
//! Every mutation is validated completely before the inventory is touched:
//! an item outside the catalog, a non-positive amount or a negative price
//! returns an error and leaves the record unchanged. Insufficient stock is
//! a regular [`MutationOutcome`], not an error.

use crate::catalog;
use crate::error::{AlmacenError, Result};

use super::model::{Inventory, StockOperation};

/// A requested change to one item's record.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add { item: String, amount: u64 },
    Remove { item: String, amount: u64 },
    SetPrice { item: String, price: f64 },
}

impl Mutation {
    /// Builds an add/remove mutation for a stock operation.
    pub fn stock(operation: StockOperation, item: impl Into<String>, amount: u64) -> Self {
        let item = item.into();
        match operation {
            StockOperation::Add => Mutation::Add { item, amount },
            StockOperation::Remove => Mutation::Remove { item, amount },
        }
    }

    pub fn item(&self) -> &str {
        match self {
            Mutation::Add { item, .. }
            | Mutation::Remove { item, .. }
            | Mutation::SetPrice { item, .. } => item,
        }
    }
}

/// Result of applying a [`Mutation`].
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Added {
        item: String,
        added: u64,
        quantity: u64,
    },
    Removed {
        item: String,
        removed: u64,
        remaining: u64,
        unit_price: f64,
        total: f64,
    },
    InsufficientStock {
        item: String,
        requested: u64,
        available: u64,
    },
    PriceSet {
        item: String,
        unit_price: f64,
    },
}

impl MutationOutcome {
    /// Whether the inventory was changed and must be persisted.
    pub fn is_applied(&self) -> bool {
        !matches!(self, MutationOutcome::InsufficientStock { .. })
    }

    pub fn item(&self) -> &str {
        match self {
            MutationOutcome::Added { item, .. }
            | MutationOutcome::Removed { item, .. }
            | MutationOutcome::InsufficientStock { item, .. }
            | MutationOutcome::PriceSet { item, .. } => item,
        }
    }
}

/// Parses a user-supplied stock amount: a positive integer.
pub fn parse_amount(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(AlmacenError::InvalidAmount(raw.trim().to_string())),
    }
}

/// Parses a user-supplied unit price: a non-negative decimal.
///
/// A leading `$` is accepted, and a lone `,` followed by one or two
/// digits is read as the decimal separator (`150,50`). A comma followed by
/// three digits (`1,000`) reads as a thousands separator and is rejected.
pub fn parse_price(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let mut number = trimmed.trim_start_matches('$').trim().to_string();
    if !number.contains('.') && number.matches(',').count() == 1 {
        let decimals = number.rsplit(',').next().map_or(0, str::len);
        if decimals > 2 {
            return Err(AlmacenError::InvalidPrice(trimmed.to_string()));
        }
        number = number.replace(',', ".");
    }
    let price = number
        .parse::<f64>()
        .map_err(|_| AlmacenError::InvalidPrice(trimmed.to_string()))?;
    validate_price(price).map_err(|_| AlmacenError::InvalidPrice(trimmed.to_string()))
}

fn validate_price(price: f64) -> Result<f64> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(AlmacenError::InvalidPrice(price.to_string()))
    }
}

fn validate_amount(amount: u64) -> Result<u64> {
    if amount == 0 {
        return Err(AlmacenError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

impl Inventory {
    /// Applies a mutation in place.
    ///
    /// Validation errors leave the inventory unchanged. Records missing for
    /// a catalog item are created at {0, 0} before the change.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationOutcome> {
        let item = mutation.item();
        if !catalog::contains(item) {
            return Err(AlmacenError::not_found("item", item));
        }

        match mutation {
            Mutation::Add { item, amount } => {
                let amount = validate_amount(*amount)?;
                let current = self.entry_or_default(item).quantity;
                let quantity = current
                    .checked_add(amount)
                    .ok_or_else(|| AlmacenError::InvalidAmount(amount.to_string()))?;
                self.entry_mut(item).quantity = quantity;
                Ok(MutationOutcome::Added {
                    item: item.clone(),
                    added: amount,
                    quantity,
                })
            }
            Mutation::Remove { item, amount } => {
                let amount = validate_amount(*amount)?;
                let current = self.entry_or_default(item);
                if current.quantity < amount {
                    return Ok(MutationOutcome::InsufficientStock {
                        item: item.clone(),
                        requested: amount,
                        available: current.quantity,
                    });
                }
                let entry = self.entry_mut(item);
                entry.quantity = current.quantity - amount;
                Ok(MutationOutcome::Removed {
                    item: item.clone(),
                    removed: amount,
                    remaining: entry.quantity,
                    unit_price: entry.unit_price,
                    total: amount as f64 * entry.unit_price,
                })
            }
            Mutation::SetPrice { item, price } => {
                let price = validate_price(*price)?;
                self.entry_mut(item).unit_price = price;
                Ok(MutationOutcome::PriceSet {
                    item: item.clone(),
                    unit_price: price,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::model::StockEntry;

    fn seeded() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.seed_missing();
        inventory
    }

    #[test]
    fn test_add_then_remove_restores_quantity() {
        for (start, n) in [(0, 1), (3, 3), (12, 50)] {
            let mut inventory = seeded();
            inventory.insert("pcp", StockEntry::new(start, 2.0));

            inventory.apply(&Mutation::stock(StockOperation::Add, "pcp", n)).unwrap();
            inventory.apply(&Mutation::stock(StockOperation::Remove, "pcp", n)).unwrap();

            assert_eq!(inventory.entry_or_default("pcp").quantity, start);
        }
    }

    #[test]
    fn test_remove_more_than_available_is_rejected() {
        let mut inventory = seeded();
        inventory.insert("glock", StockEntry::new(5, 0.0));

        let outcome = inventory
            .apply(&Mutation::Remove {
                item: "glock".into(),
                amount: 10,
            })
            .unwrap();

        assert_eq!(
            outcome,
            MutationOutcome::InsufficientStock {
                item: "glock".into(),
                requested: 10,
                available: 5
            }
        );
        assert!(!outcome.is_applied());
        assert_eq!(inventory.entry_or_default("glock").quantity, 5);
    }

    #[test]
    fn test_remove_reports_total() {
        let mut inventory = seeded();
        inventory.insert("glock", StockEntry::new(5, 150.50));

        let outcome = inventory
            .apply(&Mutation::Remove {
                item: "glock".into(),
                amount: 5,
            })
            .unwrap();

        match outcome {
            MutationOutcome::Removed {
                remaining, total, ..
            } => {
                assert_eq!(remaining, 0);
                assert!((total - 752.50).abs() < 1e-9);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let mut inventory = seeded();
        let before = inventory.clone();
        let err = inventory
            .apply(&Mutation::Add {
                item: "bazooka".into(),
                amount: 1,
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let mut inventory = seeded();
        let err = inventory
            .apply(&Mutation::Add {
                item: "glock".into(),
                amount: 0,
            })
            .unwrap_err();
        assert!(matches!(err, AlmacenError::InvalidAmount(_)));
    }

    #[test]
    fn test_add_overflow_is_rejected() {
        let mut inventory = seeded();
        inventory.insert("glock", StockEntry::new(u64::MAX, 0.0));
        assert!(inventory
            .apply(&Mutation::Add {
                item: "glock".into(),
                amount: 1
            })
            .is_err());
        assert_eq!(inventory.entry_or_default("glock").quantity, u64::MAX);
    }

    #[test]
    fn test_set_price_rejects_negative_and_non_finite() {
        let mut inventory = seeded();
        inventory.insert("glock", StockEntry::new(1, 9.0));
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(inventory
                .apply(&Mutation::SetPrice {
                    item: "glock".into(),
                    price
                })
                .is_err());
        }
        assert_eq!(inventory.entry_or_default("glock").unit_price, 9.0);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 25 ").unwrap(), 25);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("2.5").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("150.50").unwrap(), 150.50);
        assert_eq!(parse_price("$ 20").unwrap(), 20.0);
        assert_eq!(parse_price("150,50").unwrap(), 150.50);
        assert_eq!(parse_price("7,5").unwrap(), 7.5);
        assert!(parse_price("1,000").is_err());
        assert!(parse_price("$2,500").is_err());
        assert_eq!(parse_price("0").unwrap(), 0.0);
        assert!(parse_price("-5").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("").is_err());
    }
}
