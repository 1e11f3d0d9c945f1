//! Keep-alive delivery over the Discord HTTP API.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use almacen_application::maintenance::KeepAliveNotifier;
use almacen_application::view::View;
use almacen_core::error::{AlmacenError, Result};
use async_trait::async_trait;
use serenity::all::{Cache, ChannelId, ChannelType, CreateMessage, Http};
use tokio::sync::Mutex;

use super::convert;

/// Channel names tried first, in order, when picking the notification channel.
const PREFERRED_CHANNELS: [&str; 4] = ["bot-logs", "sistema", "general", "inventario"];

/// Posts keep-alive notices to the first suitable text channel.
///
/// Inactive until [`DiscordNotifier::attach`] is called from the ready event.
#[derive(Default)]
pub struct DiscordNotifier {
    gateway: OnceLock<(Arc<Http>, Arc<Cache>)>,
    channel: Mutex<Option<ChannelId>>,
}

impl DiscordNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, http: Arc<Http>, cache: Arc<Cache>) {
        let _ = self.gateway.set((http, cache));
    }

    async fn channel(&self, cache: &Cache) -> Option<ChannelId> {
        let mut selected = self.channel.lock().await;
        if selected.is_none() {
            *selected = find_notification_channel(cache);
            if let Some(channel) = *selected {
                tracing::info!(channel = %channel, "Notification channel selected");
            }
        }
        *selected
    }
}

/// Scans cached guilds for a text channel the bot can write to, preferring
/// the names in [`PREFERRED_CHANNELS`].
fn find_notification_channel(cache: &Cache) -> Option<ChannelId> {
    let me = cache.current_user().id;
    for guild_id in cache.guilds() {
        let Some(guild) = cache.guild(guild_id) else {
            continue;
        };
        let member = guild.members.get(&me);
        let writable: Vec<_> = guild
            .channels
            .values()
            .filter(|channel| channel.kind == ChannelType::Text)
            .filter(|channel| {
                member.is_none_or(|member| {
                    let permissions = guild.user_permissions_in(channel, member);
                    permissions.send_messages() && permissions.view_channel()
                })
            })
            .collect();

        for preferred in PREFERRED_CHANNELS {
            if let Some(channel) = writable
                .iter()
                .find(|channel| channel.name.to_lowercase().contains(preferred))
            {
                return Some(channel.id);
            }
        }
        if let Some(channel) = writable.first() {
            return Some(channel.id);
        }
    }
    None
}

#[async_trait]
impl KeepAliveNotifier for DiscordNotifier {
    async fn notify(&self, view: View, ttl: Duration) -> Result<bool> {
        let Some((http, cache)) = self.gateway.get() else {
            return Ok(false);
        };
        let Some(channel) = self.channel(cache).await else {
            return Ok(false);
        };

        let message = channel
            .send_message(http.as_ref(), CreateMessage::new().embed(convert::embed(&view)))
            .await
            .map_err(|e| AlmacenError::platform(format!("Failed to send keep-alive: {e}")))?;

        let http = http.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = channel.delete_message(&http, message.id).await {
                tracing::debug!(error = %e, "Failed to delete keep-alive notice");
            }
        });
        Ok(true)
    }
}
