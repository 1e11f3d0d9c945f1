//! End-to-end flows through the routers against the JSON-directory store.

use std::sync::Arc;

use almacen_application::{
    ActivityTracker, CommandResponse, CommandUseCase, InteractionContext, InteractionUseCase,
    InventoryCache, InventoryService, Reply,
};
use almacen_core::inventory::{InventoryRepository, StockEntry};
use almacen_core::navigation::SessionStore;
use almacen_core::{CommunityId, UserId};
use almacen_infrastructure::{AsyncDirInventoryRepository, InMemorySessionStore};
use tempfile::TempDir;

const GUILD: CommunityId = CommunityId(424242);
const USER: UserId = UserId(17);

struct Bot {
    repository: Arc<AsyncDirInventoryRepository>,
    service: InventoryService,
    interactions: InteractionUseCase,
    commands: CommandUseCase,
    sessions: Arc<InMemorySessionStore>,
}

fn bot(dir: &TempDir) -> Bot {
    let repository = Arc::new(AsyncDirInventoryRepository::with_base_path(
        dir.path().to_path_buf(),
        "inventario_gta_",
    ));
    let sessions = Arc::new(InMemorySessionStore::new());
    let activity = Arc::new(ActivityTracker::new());
    let service = InventoryService::new(Arc::new(InventoryCache::new(repository.clone())));
    Bot {
        interactions: InteractionUseCase::new(service.clone(), sessions.clone(), activity.clone()),
        commands: CommandUseCase::new(service.clone(), sessions.clone(), activity),
        service,
        repository,
        sessions,
    }
}

fn ctx(message_id: u64) -> InteractionContext {
    InteractionContext {
        community: GUILD,
        user: USER,
        message_id: Some(message_id),
    }
}

fn description(reply: &Reply) -> &str {
    match reply {
        Reply::Update(view) | Reply::Send(view) => &view.description,
        other => panic!("expected a view, got {other:?}"),
    }
}

#[tokio::test]
async fn stock_and_price_scenario_persists_every_step() {
    let dir = TempDir::new().unwrap();
    let bot = bot(&dir);

    assert_eq!(bot.service.seed(GUILD).await.unwrap(), 21);
    assert_eq!(bot.service.seed(GUILD).await.unwrap(), 0);

    // Add 5.
    let reply = bot.interactions.handle_component(ctx(1), "qty_add_Z2xvY2s=_5").await;
    assert!(description(&reply).contains("**Nuevo stock:** 5"));
    let stored = bot.repository.load(GUILD).await.unwrap();
    assert_eq!(stored.get("glock"), Some(&StockEntry::new(5, 0.0)));

    // Removing 10 is rejected and changes nothing.
    let reply = bot
        .interactions
        .handle_component(ctx(1), "qty_remove_Z2xvY2s=_10")
        .await;
    assert!(description(&reply).contains("STOCK INSUFICIENTE"));
    assert!(description(&reply).contains("**Stock disponible:** 5"));
    assert_eq!(bot.repository.load(GUILD).await.unwrap(), stored);

    // Price 150.50 through the form.
    let reply = bot
        .interactions
        .handle_form(ctx(1), "modal_price_Z2xvY2s=", Some("150.50"))
        .await;
    assert!(matches!(reply, Reply::Send(_)));
    assert!(description(&reply).contains("**Nuevo precio:** $150.50"));

    // Remove 5 for a total of 752.50.
    let reply = bot
        .interactions
        .handle_component(ctx(1), "qty_remove_Z2xvY2s=_5")
        .await;
    assert!(description(&reply).contains("🧾 **Total generado:** $752.50"));
    assert!(description(&reply).contains("**Stock restante:** 0"));

    let stored = bot.repository.load(GUILD).await.unwrap();
    assert_eq!(stored.get("glock"), Some(&StockEntry::new(0, 150.5)));
}

#[tokio::test]
async fn menu_navigation_from_text_command() {
    let dir = TempDir::new().unwrap();
    let bot = bot(&dir);

    let Some(CommandResponse::Menu(view)) = bot.commands.handle(GUILD, "!inventario").await else {
        panic!("expected the home menu");
    };
    assert!(view.has_button("cat_armas"));
    bot.commands.menu_posted(USER, 900).await;

    let reply = bot.interactions.handle_component(ctx(900), "cat_cargadores").await;
    assert!(description(&reply).contains("cargador pistolas"));

    // Item names with spaces survive the token round trip.
    let product = match &reply {
        Reply::Update(view) => view
            .buttons
            .iter()
            .find(|b| b.label == "cargador subfusil")
            .map(|b| b.custom_id.clone())
            .unwrap(),
        other => panic!("unexpected reply {other:?}"),
    };
    let reply = bot.interactions.handle_component(ctx(900), &product).await;
    assert!(matches!(reply, Reply::Update(ref v) if v.title.ends_with("CARGADOR SUBFUSIL")));

    let reply = bot.interactions.handle_component(ctx(900), "back").await;
    assert!(matches!(reply, Reply::Update(ref v) if v.title == "📦 Cargadores"));

    let session = bot.sessions.get(USER).await.unwrap();
    assert_eq!(session.message_id, Some(900));
}

#[tokio::test]
async fn communities_do_not_share_stock() {
    let dir = TempDir::new().unwrap();
    let bot = bot(&dir);
    let other = InteractionContext {
        community: CommunityId(1),
        ..ctx(1)
    };

    bot.interactions.handle_component(ctx(1), "qty_add_cGNw_3").await;
    let reply = bot.interactions.handle_component(other, "qty_remove_cGNw_1").await;

    assert!(description(&reply).contains("STOCK INSUFICIENTE"));
    assert!(dir.path().join("inventario_gta_424242.json").exists());
}

#[tokio::test]
async fn state_survives_cache_eviction() {
    let dir = TempDir::new().unwrap();
    let bot = bot(&dir);

    bot.interactions.handle_component(ctx(1), "qty_add_cm9wYQ==_25").await;
    bot.service.forget(GUILD).await;

    let Some(CommandResponse::Embed(view)) = bot.commands.handle(GUILD, "!stock ropa").await else {
        panic!("expected an embed");
    };
    assert!(view.description.contains("**ropa**: 25u"));
}
