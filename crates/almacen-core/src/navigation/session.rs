//! Per-user navigation state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category};
use crate::inventory::StockOperation;

/// A navigable screen and the context needed to go back from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Screen {
    Home,
    Category {
        category: Category,
    },
    Product {
        item: String,
        category: Option<Category>,
    },
    Quantity {
        item: String,
        operation: StockOperation,
        category: Option<Category>,
    },
}

impl Screen {
    /// Product screen for `item`, with its owning category resolved.
    pub fn product(item: impl Into<String>) -> Self {
        let item = item.into();
        let category = catalog::category_of(&item);
        Screen::Product { item, category }
    }

    /// The category remembered by this screen, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            Screen::Home => None,
            Screen::Category { category } => Some(*category),
            Screen::Product { category, .. } | Screen::Quantity { category, .. } => *category,
        }
    }

    /// The screen a `back` action leads to.
    pub fn back(&self) -> Screen {
        match self {
            Screen::Home | Screen::Category { .. } => Screen::Home,
            Screen::Product {
                category: Some(category),
                ..
            } => Screen::Category {
                category: *category,
            },
            Screen::Product { category: None, .. } => Screen::Home,
            Screen::Quantity { item, .. } => Screen::product(item.clone()),
        }
    }
}

/// Transient navigation record of one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationSession {
    pub screen: Screen,
    /// Message carrying the menu the user is navigating.
    pub message_id: Option<u64>,
    pub updated_at: DateTime<Utc>,
}

impl NavigationSession {
    pub fn new(screen: Screen, message_id: Option<u64>) -> Self {
        Self {
            screen,
            message_id,
            updated_at: Utc::now(),
        }
    }

    /// Whether the session has been idle for at least `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.updated_at >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_targets() {
        assert_eq!(Screen::Home.back(), Screen::Home);
        assert_eq!(
            Screen::Category {
                category: Category::Drogas
            }
            .back(),
            Screen::Home
        );
        assert_eq!(
            Screen::product("glock").back(),
            Screen::Category {
                category: Category::Armas
            }
        );
        assert_eq!(
            Screen::Quantity {
                item: "pcp".into(),
                operation: StockOperation::Add,
                category: None,
            }
            .back(),
            Screen::Product {
                item: "pcp".into(),
                category: Some(Category::Drogas)
            }
        );
    }

    #[test]
    fn test_expiry() {
        let mut session = NavigationSession::new(Screen::Home, None);
        let now = Utc::now();
        session.updated_at = now - Duration::minutes(29);
        assert!(!session.is_expired(now, Duration::minutes(30)));
        session.updated_at = now - Duration::minutes(30);
        assert!(session.is_expired(now, Duration::minutes(30)));
    }
}
