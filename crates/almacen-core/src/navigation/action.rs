//! Action identifiers attached to buttons and forms.
//!
//! Grammar (`_`-delimited, case-sensitive):
//!
//! | Identifier | Action |
//! |---|---|
//! | `home` | [`Action::Home`] |
//! | `back` | [`Action::Back`] |
//! | `stock_completo` | [`Action::FullStock`] |
//! | `cat_<category>` | [`Action::Category`] |
//! | `prod_<token>` | [`Action::Product`] |
//! | `op_add_<token>` / `op_remove_<token>` | [`Action::Operation`] |
//! | `op_price_<token>` | [`Action::OpenPrice`] |
//! | `modal_price_<token>` | [`Action::SubmitPrice`] |
//! | `qty_<op>_<token>_<amount>` | [`Action::Quantity`] |
//!
//! `<token>` is an item name encoded with [`crate::codec`].

use std::str::FromStr;

use crate::catalog::Category;
use crate::codec;
use crate::error::{AlmacenError, Result};
use crate::inventory::{StockOperation, parse_amount};

const HOME: &str = "home";
const BACK: &str = "back";
const FULL_STOCK: &str = "stock_completo";
const CATEGORY_PREFIX: &str = "cat_";
const PRODUCT_PREFIX: &str = "prod_";
const OPERATION_PREFIX: &str = "op_";
const PRICE_OPERATION: &str = "price";
const PRICE_FORM_PREFIX: &str = "modal_price_";
const QUANTITY_PREFIX: &str = "qty_";

/// Custom id of the text input inside the price form.
pub const PRICE_INPUT_ID: &str = "precio_input";

/// A parsed action identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Home,
    Back,
    FullStock,
    Category(Category),
    Product {
        item: String,
    },
    Operation {
        operation: StockOperation,
        item: String,
    },
    OpenPrice {
        item: String,
    },
    SubmitPrice {
        item: String,
    },
    Quantity {
        operation: StockOperation,
        item: String,
        amount: u64,
    },
}

impl Action {
    /// Parses an action identifier.
    ///
    /// Unknown or malformed identifiers return [`AlmacenError::InvalidAction`];
    /// an unknown category returns a `category` not-found error and a bad
    /// amount returns [`AlmacenError::InvalidAmount`].
    pub fn parse(id: &str) -> Result<Self> {
        match id {
            HOME => return Ok(Action::Home),
            BACK => return Ok(Action::Back),
            FULL_STOCK => return Ok(Action::FullStock),
            _ => {}
        }

        if let Some(rest) = id.strip_prefix(CATEGORY_PREFIX) {
            return Category::from_str(rest)
                .map(Action::Category)
                .map_err(|_| AlmacenError::not_found("category", rest));
        }
        if let Some(token) = id.strip_prefix(PRODUCT_PREFIX) {
            return Ok(Action::Product {
                item: decode_item(id, token)?,
            });
        }
        if let Some(token) = id.strip_prefix(PRICE_FORM_PREFIX) {
            return Ok(Action::SubmitPrice {
                item: decode_item(id, token)?,
            });
        }
        if let Some(rest) = id.strip_prefix(OPERATION_PREFIX) {
            let (operation, token) = rest
                .split_once('_')
                .ok_or_else(|| AlmacenError::InvalidAction(id.to_string()))?;
            let item = decode_item(id, token)?;
            if operation == PRICE_OPERATION {
                return Ok(Action::OpenPrice { item });
            }
            let operation = StockOperation::from_str(operation)
                .map_err(|_| AlmacenError::InvalidAction(id.to_string()))?;
            return Ok(Action::Operation { operation, item });
        }
        if let Some(rest) = id.strip_prefix(QUANTITY_PREFIX) {
            // Only the operation and the trailing amount are split off; the
            // token in between is opaque.
            let (operation, rest) = rest
                .split_once('_')
                .ok_or_else(|| AlmacenError::InvalidAction(id.to_string()))?;
            let (token, amount) = rest
                .rsplit_once('_')
                .ok_or_else(|| AlmacenError::InvalidAction(id.to_string()))?;
            let operation = StockOperation::from_str(operation)
                .map_err(|_| AlmacenError::InvalidAction(id.to_string()))?;
            let amount = parse_amount(amount)?;
            let item = decode_item(id, token)?;
            return Ok(Action::Quantity {
                operation,
                item,
                amount,
            });
        }

        Err(AlmacenError::InvalidAction(id.to_string()))
    }

    /// Renders the identifier for this action.
    pub fn custom_id(&self) -> String {
        match self {
            Action::Home => HOME.to_string(),
            Action::Back => BACK.to_string(),
            Action::FullStock => FULL_STOCK.to_string(),
            Action::Category(category) => format!("{CATEGORY_PREFIX}{category}"),
            Action::Product { item } => format!("{PRODUCT_PREFIX}{}", codec::encode(item)),
            Action::Operation { operation, item } => {
                format!("{OPERATION_PREFIX}{operation}_{}", codec::encode(item))
            }
            Action::OpenPrice { item } => {
                format!("{OPERATION_PREFIX}{PRICE_OPERATION}_{}", codec::encode(item))
            }
            Action::SubmitPrice { item } => {
                format!("{PRICE_FORM_PREFIX}{}", codec::encode(item))
            }
            Action::Quantity {
                operation,
                item,
                amount,
            } => format!(
                "{QUANTITY_PREFIX}{operation}_{}_{amount}",
                codec::encode(item)
            ),
        }
    }
}

impl FromStr for Action {
    type Err = AlmacenError;

    fn from_str(s: &str) -> Result<Self> {
        Action::parse(s)
    }
}

fn decode_item(id: &str, token: &str) -> Result<String> {
    if token.is_empty() {
        return Err(AlmacenError::InvalidAction(id.to_string()));
    }
    let item = codec::decode(token);
    if item.trim().is_empty() {
        return Err(AlmacenError::InvalidAction(id.to_string()));
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glock() -> String {
        codec::encode("glock")
    }

    #[test]
    fn test_fixed_identifiers() {
        assert_eq!(Action::parse("home").unwrap(), Action::Home);
        assert_eq!(Action::parse("back").unwrap(), Action::Back);
        assert_eq!(Action::parse("stock_completo").unwrap(), Action::FullStock);
    }

    #[test]
    fn test_category() {
        assert_eq!(
            Action::parse("cat_drogas").unwrap(),
            Action::Category(Category::Drogas)
        );
        assert!(Action::parse("cat_coches").unwrap_err().is_not_found());
    }

    #[test]
    fn test_product_and_operations() {
        assert_eq!(
            Action::parse(&format!("prod_{}", glock())).unwrap(),
            Action::Product {
                item: "glock".into()
            }
        );
        assert_eq!(
            Action::parse(&format!("op_remove_{}", glock())).unwrap(),
            Action::Operation {
                operation: StockOperation::Remove,
                item: "glock".into()
            }
        );
        assert_eq!(
            Action::parse(&format!("op_price_{}", glock())).unwrap(),
            Action::OpenPrice {
                item: "glock".into()
            }
        );
        assert_eq!(
            Action::parse(&format!("modal_price_{}", glock())).unwrap(),
            Action::SubmitPrice {
                item: "glock".into()
            }
        );
    }

    #[test]
    fn test_quantity() {
        assert_eq!(
            Action::parse(&format!("qty_add_{}_25", glock())).unwrap(),
            Action::Quantity {
                operation: StockOperation::Add,
                item: "glock".into(),
                amount: 25
            }
        );
    }

    #[test]
    fn test_quantity_token_may_contain_underscores() {
        // Hand-written tokens fall back to underscore-for-space decoding.
        assert_eq!(
            Action::parse("qty_remove_cargador_pistolas_3").unwrap(),
            Action::Quantity {
                operation: StockOperation::Remove,
                item: "cargador pistolas".into(),
                amount: 3
            }
        );
    }

    #[test]
    fn test_malformed_identifiers() {
        for id in [
            "",
            "HOME",
            "unknown",
            "prod_",
            "op_add",
            "op_sell_Z2xvY2s=",
            "qty_add_Z2xvY2s=",
            "qty_steal_Z2xvY2s=_5",
        ] {
            assert!(
                matches!(Action::parse(id), Err(AlmacenError::InvalidAction(_))),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_amount() {
        for id in ["qty_add_Z2xvY2s=_0", "qty_add_Z2xvY2s=_x", "qty_add_Z2xvY2s=_-1"] {
            assert!(matches!(
                Action::parse(id),
                Err(AlmacenError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn test_custom_id_parses_back() {
        let actions = [
            Action::Home,
            Action::Back,
            Action::FullStock,
            Action::Category(Category::Planos),
            Action::Product {
                item: "arquitectónico".into(),
            },
            Action::Operation {
                operation: StockOperation::Add,
                item: "cargador subfusil".into(),
            },
            Action::OpenPrice {
                item: "pcp".into(),
            },
            Action::SubmitPrice {
                item: "pcp".into(),
            },
            Action::Quantity {
                operation: StockOperation::Remove,
                item: "cargador pistolas".into(),
                amount: 50,
            },
        ];
        for action in actions {
            assert_eq!(Action::parse(&action.custom_id()).unwrap(), action);
        }
    }
}
