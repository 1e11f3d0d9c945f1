//! Routing of `!`-prefixed text commands.

use std::sync::Arc;

use almacen_core::command::{COMMAND_PREFIX, TextCommand, parse_command};
use almacen_core::error::Result;
use almacen_core::navigation::{NavigationSession, Screen, SessionStore};
use almacen_core::{CommunityId, UserId};

use crate::activity::ActivityTracker;
use crate::inventory_service::InventoryService;
use crate::render;
use crate::view::View;

const COMMAND_FAILURE: &str = "❌ Error procesando comando";

/// What to post in answer to a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResponse {
    /// The interactive home menu. Once posted, report its message id
    /// through [`CommandUseCase::menu_posted`].
    Menu(View),
    Embed(View),
    Text(String),
}

pub struct CommandUseCase {
    inventory: InventoryService,
    sessions: Arc<dyn SessionStore>,
    activity: Arc<ActivityTracker>,
}

impl CommandUseCase {
    pub fn new(
        inventory: InventoryService,
        sessions: Arc<dyn SessionStore>,
        activity: Arc<ActivityTracker>,
    ) -> Self {
        Self {
            inventory,
            sessions,
            activity,
        }
    }

    /// Handles a chat message. Returns `None` when the message is not a
    /// known command, which is ignored silently.
    pub async fn handle(&self, community: CommunityId, content: &str) -> Option<CommandResponse> {
        if !content.starts_with(COMMAND_PREFIX) {
            return None;
        }
        self.activity.record();
        let command = parse_command(content, COMMAND_PREFIX)?;

        match self.execute(community, &command).await {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::error!(community = %community, command = ?command, error = %e, "Command failed");
                Some(CommandResponse::Text(COMMAND_FAILURE.to_string()))
            }
        }
    }

    async fn execute(&self, community: CommunityId, command: &TextCommand) -> Result<CommandResponse> {
        Ok(match command {
            TextCommand::Inventory => CommandResponse::Menu(render::home()),
            TextCommand::Help => CommandResponse::Embed(render::help()),
            TextCommand::Stock { term: None } => {
                let inventory = self.inventory.inventory(community).await?;
                CommandResponse::Embed(render::quick_stock(&inventory))
            }
            TextCommand::Stock { term: Some(term) } => {
                let inventory = self.inventory.inventory(community).await?;
                CommandResponse::Embed(render::search(term, &inventory))
            }
        })
    }

    /// Starts a `home` session tied to a freshly posted menu.
    pub async fn menu_posted(&self, user: UserId, message_id: u64) {
        self.sessions
            .put(user, NavigationSession::new(Screen::Home, Some(message_id)))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory_cache::InventoryCache;
    use crate::inventory_cache::tests::MockInventoryRepository;
    use almacen_infrastructure::InMemorySessionStore;
    use std::sync::atomic::Ordering;

    fn usecase(repo: Arc<MockInventoryRepository>) -> (CommandUseCase, Arc<InMemorySessionStore>) {
        let sessions = Arc::new(InMemorySessionStore::new());
        let inventory = InventoryService::new(Arc::new(InventoryCache::new(repo)));
        let usecase =
            CommandUseCase::new(inventory, sessions.clone(), Arc::new(ActivityTracker::new()));
        (usecase, sessions)
    }

    #[tokio::test]
    async fn test_inventory_aliases_open_menu() {
        let (usecase, sessions) = usecase(Arc::default());
        for content in ["!inventario", "!INV", "!start"] {
            let response = usecase.handle(CommunityId(1), content).await;
            assert!(matches!(response, Some(CommandResponse::Menu(_))), "{content}");
        }

        usecase.menu_posted(UserId(3), 42).await;
        let session = sessions.get(UserId(3)).await.unwrap();
        assert_eq!(session.screen, Screen::Home);
        assert_eq!(session.message_id, Some(42));
    }

    #[tokio::test]
    async fn test_stock_listing_and_search() {
        let (usecase, _) = usecase(Arc::default());

        let Some(CommandResponse::Embed(view)) = usecase.handle(CommunityId(1), "!stock").await else {
            panic!("expected an embed");
        };
        assert!(view.description.contains("Valor total del inventario"));

        let Some(CommandResponse::Embed(view)) = usecase.handle(CommunityId(1), "!s GLOCK").await
        else {
            panic!("expected an embed");
        };
        assert_eq!(view.title, "📋 Encontrado");

        let Some(CommandResponse::Embed(view)) = usecase.handle(CommunityId(1), "!s rifle").await
        else {
            panic!("expected an embed");
        };
        assert_eq!(view.title, "❌ No encontrado");
    }

    #[tokio::test]
    async fn test_unknown_or_plain_messages_are_ignored() {
        let (usecase, _) = usecase(Arc::default());
        assert_eq!(usecase.handle(CommunityId(1), "!bailar").await, None);
        assert_eq!(usecase.handle(CommunityId(1), "hola").await, None);
    }

    #[tokio::test]
    async fn test_store_failure_replies_with_text() {
        let repo = Arc::new(MockInventoryRepository::default());
        repo.fail_reads.store(true, Ordering::SeqCst);
        let (usecase, _) = usecase(repo);

        assert_eq!(
            usecase.handle(CommunityId(1), "!stock").await,
            Some(CommandResponse::Text(COMMAND_FAILURE.to_string()))
        );
    }
}
