//! Almacén bot binary.
//!
//! Loads configuration, connects the record store, then runs the health
//! endpoint, the maintenance tasks and the Discord gateway until a
//! shutdown signal arrives.

mod app;
mod discord;
mod health;

use std::sync::Arc;
use std::time::Instant;

use almacen_application::maintenance::MaintenanceTasks;
use almacen_infrastructure::ConfigService;
use anyhow::{Context, Result};
use serenity::all::{Client, GatewayIntents};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::discord::{DiscordNotifier, Handler};
use crate::health::HealthState;

#[tokio::main]
async fn main() -> Result<()> {
    let started = Instant::now();
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ConfigService::from_env()
        .load()
        .context("Invalid configuration")?;
    tracing::info!("Starting Almacén");

    let app = app::bootstrap(config).await?.app_state;
    let shutdown = CancellationToken::new();

    let listener = TcpListener::bind(("0.0.0.0", app.config.port))
        .await
        .with_context(|| format!("Failed to bind health port {}", app.config.port))?;
    tracing::info!(port = app.config.port, "Health endpoint listening");
    let health = tokio::spawn(health::serve(
        listener,
        HealthState::new(started, app.connected.clone()),
        shutdown.clone(),
    ));

    let notifier = Arc::new(DiscordNotifier::new());
    let maintenance = MaintenanceTasks::spawn(
        &app.config.maintenance,
        app.inventory_cache.clone(),
        app.session_store.clone(),
        app.activity.clone(),
        notifier.clone(),
    );

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&app.config.discord_token, intents)
        .event_handler(Handler::new(app.clone(), notifier))
        .await
        .context("Failed to build the Discord client")?;
    let shard_manager = client.shard_manager.clone();
    let mut gateway = tokio::spawn(async move { client.start().await });

    let gateway_result = tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            Ok(())
        }
        result = &mut gateway => match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(anyhow::Error::new(e).context("Discord gateway failed")),
            Err(e) => Err(anyhow::Error::new(e).context("Discord gateway task panicked")),
        },
    };

    shutdown.cancel();
    maintenance.shutdown().await;
    let report = app.inventory_cache.flush_all().await;
    if report.failed > 0 {
        tracing::warn!(
            saved = report.saved,
            failed = report.failed,
            "Some communities were not saved on shutdown"
        );
    } else {
        tracing::info!(saved = report.saved, "Inventories saved");
    }
    shard_manager.shutdown_all().await;
    if let Err(e) = health.await {
        tracing::warn!(error = %e, "Health endpoint ended abnormally");
    }

    tracing::info!("Almacén stopped");
    gateway_result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("almacen=info,almacen_application=info,almacen_infrastructure=info,warn"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
