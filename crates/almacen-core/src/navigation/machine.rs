//! Screen transitions driven by actions.

use crate::catalog;
use crate::error::{AlmacenError, Result};

use super::action::Action;
use super::session::{NavigationSession, Screen};

/// Effect of an action on the tracked screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Show `Screen` and record it as the user's session state.
    Navigate(Screen),
    /// Handle the action without changing the tracked screen.
    Stay,
}

/// Computes the transition for `action` given the user's current session.
///
/// Items named by product and operation actions must belong to the
/// catalog; otherwise an `item` not-found error is returned and nothing
/// changes.
pub fn transition(current: Option<&NavigationSession>, action: &Action) -> Result<Transition> {
    let transition = match action {
        Action::Home => Transition::Navigate(Screen::Home),
        Action::Back => Transition::Navigate(
            current
                .map(|session| session.screen.back())
                .unwrap_or(Screen::Home),
        ),
        Action::Category(category) => Transition::Navigate(Screen::Category {
            category: *category,
        }),
        Action::Product { item } => {
            require_catalog_item(item)?;
            Transition::Navigate(Screen::product(item.clone()))
        }
        Action::Operation { operation, item } => {
            require_catalog_item(item)?;
            Transition::Navigate(Screen::Quantity {
                item: item.clone(),
                operation: *operation,
                category: current.and_then(|session| session.screen.category()),
            })
        }
        Action::OpenPrice { item } | Action::SubmitPrice { item } => {
            require_catalog_item(item)?;
            Transition::Stay
        }
        Action::Quantity { .. } | Action::FullStock => Transition::Stay,
    };
    Ok(transition)
}

fn require_catalog_item(item: &str) -> Result<()> {
    if catalog::contains(item) {
        Ok(())
    } else {
        Err(AlmacenError::not_found("item", item))
    }
}
