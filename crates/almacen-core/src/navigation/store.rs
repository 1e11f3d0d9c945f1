//! Session store trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::community::UserId;

use super::session::NavigationSession;

/// Holds one [`NavigationSession`] per user.
///
/// Writes overwrite unconditionally; concurrent writers for the same user
/// resolve as last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user: UserId) -> Option<NavigationSession>;

    async fn put(&self, user: UserId, session: NavigationSession);

    /// Drops every session idle for at least `ttl` and returns how many.
    async fn purge_idle(&self, now: DateTime<Utc>, ttl: Duration) -> usize;

    async fn len(&self) -> usize;
}
