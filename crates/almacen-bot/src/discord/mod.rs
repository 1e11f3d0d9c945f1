//! Discord adapter: gateway events in, builders out.

pub mod convert;
pub mod handler;
pub mod notifier;

pub use handler::Handler;
pub use notifier::DiscordNotifier;
