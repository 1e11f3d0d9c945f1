//! Platform-neutral description of what the bot shows.
//!
//! Renderers produce these values and the chat adapter translates them
//! into platform messages, so every screen can be tested without a
//! gateway connection.

pub mod model;

pub use model::{
    Button, ButtonStyle, Colour, MAX_BUTTONS_PER_ROW, PriceForm, Reply, View,
};
