//! In-memory navigation session store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use almacen_core::UserId;
use almacen_core::navigation::{NavigationSession, SessionStore};

/// Process-local [`SessionStore`]. Sessions do not survive a restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, NavigationSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user: UserId) -> Option<NavigationSession> {
        self.sessions.read().await.get(&user).cloned()
    }

    async fn put(&self, user: UserId, session: NavigationSession) {
        self.sessions.write().await.insert(user, session);
    }

    async fn purge_idle(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, ttl));
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almacen_core::catalog::Category;
    use almacen_core::navigation::Screen;

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = InMemorySessionStore::new();
        let user = UserId(1);
        store
            .put(user, NavigationSession::new(Screen::Home, Some(10)))
            .await;
        store
            .put(
                user,
                NavigationSession::new(
                    Screen::Category {
                        category: Category::Planos,
                    },
                    Some(10),
                ),
            )
            .await;

        let session = store.get(user).await.unwrap();
        assert_eq!(session.screen.category(), Some(Category::Planos));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_purge_idle_drops_only_expired() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        let mut stale = NavigationSession::new(Screen::Home, None);
        stale.updated_at = now - Duration::minutes(31);
        let mut fresh = NavigationSession::new(Screen::Home, None);
        fresh.updated_at = now - Duration::minutes(5);

        store.put(UserId(1), stale).await;
        store.put(UserId(2), fresh).await;

        let purged = store.purge_idle(now, Duration::minutes(30)).await;
        assert_eq!(purged, 1);
        assert!(store.get(UserId(1)).await.is_none());
        assert!(store.get(UserId(2)).await.is_some());
    }
}
