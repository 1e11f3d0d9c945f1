//! Per-user navigation state machine.
//!
//! Users move between the home, category, product and quantity screens by
//! pressing buttons whose identifiers parse into [`Action`]s. Each user's
//! current screen is kept in a [`SessionStore`] so that `back` can
//! reconstruct the previous screen.

pub mod action;
pub mod machine;
pub mod session;
pub mod store;

pub use action::{Action, PRICE_INPUT_ID};
pub use machine::{Transition, transition};
pub use session::{NavigationSession, Screen};
pub use store::SessionStore;
