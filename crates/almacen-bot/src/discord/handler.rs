//! Gateway event handler.

use std::sync::Arc;

use almacen_application::{CommandResponse, InteractionContext, Reply, render};
use almacen_core::navigation::PRICE_INPUT_ID;
use almacen_core::{CommunityId, UserId};
use async_trait::async_trait;
use serenity::all::{
    ActionRowComponent, ActivityData, ComponentInteraction, Context, CreateInteractionResponse,
    EventHandler, Guild, GuildId, Interaction, Message, ModalInteraction, Ready, UnavailableGuild,
};

use super::convert;
use super::notifier::DiscordNotifier;
use crate::app::AppState;

const PRESENCE: &str = "Inventario GTA RP 🔫";
const RESPONSE_FAILURE: &str = "❌ Error procesando operación";

pub struct Handler {
    state: Arc<AppState>,
    notifier: Arc<DiscordNotifier>,
}

impl Handler {
    pub fn new(state: Arc<AppState>, notifier: Arc<DiscordNotifier>) -> Self {
        Self { state, notifier }
    }

    async fn seed(&self, guild: GuildId) {
        let community = CommunityId(guild.get());
        match self.state.inventory_service.seed(community).await {
            Ok(0) => {}
            Ok(inserted) => tracing::info!(community = %community, inserted, "Catalog seeded"),
            Err(e) => tracing::error!(community = %community, error = %e, "Failed to seed catalog"),
        }
    }

    async fn on_component(&self, ctx: &Context, interaction: &ComponentInteraction) {
        let Some(guild) = interaction.guild_id else {
            tracing::debug!(custom_id = %interaction.data.custom_id, "Component outside a guild");
            let reply = Reply::Ephemeral(render::guild_only());
            if let Err(e) = interaction.create_response(&ctx.http, response(&reply)).await {
                tracing::warn!(error = %e, "Failed to answer button outside a guild");
            }
            return;
        };
        let context = InteractionContext {
            community: CommunityId(guild.get()),
            user: UserId(interaction.user.id.get()),
            message_id: Some(interaction.message.id.get()),
        };
        let reply = self
            .state
            .interaction_usecase
            .handle_component(context, &interaction.data.custom_id)
            .await;

        if let Err(e) = interaction.create_response(&ctx.http, response(&reply)).await {
            tracing::error!(custom_id = %interaction.data.custom_id, error = %e, "Failed to answer button");
            if let Err(e) = interaction
                .create_followup(&ctx.http, convert::ephemeral_followup(RESPONSE_FAILURE))
                .await
            {
                tracing::warn!(error = %e, "Failed to send error follow-up");
            }
        }
    }

    async fn on_modal(&self, ctx: &Context, interaction: &ModalInteraction) {
        let Some(guild) = interaction.guild_id else {
            tracing::debug!(custom_id = %interaction.data.custom_id, "Form outside a guild");
            let reply = Reply::Ephemeral(render::guild_only());
            if let Err(e) = interaction.create_response(&ctx.http, response(&reply)).await {
                tracing::warn!(error = %e, "Failed to answer form outside a guild");
            }
            return;
        };
        let context = InteractionContext {
            community: CommunityId(guild.get()),
            user: UserId(interaction.user.id.get()),
            message_id: interaction.message.as_ref().map(|m| m.id.get()),
        };
        let price = interaction
            .data
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .find_map(|component| match component {
                ActionRowComponent::InputText(input) if input.custom_id == PRICE_INPUT_ID => {
                    input.value.as_deref()
                }
                _ => None,
            });
        let reply = self
            .state
            .interaction_usecase
            .handle_form(context, &interaction.data.custom_id, price)
            .await;

        if let Err(e) = interaction.create_response(&ctx.http, response(&reply)).await {
            tracing::error!(custom_id = %interaction.data.custom_id, error = %e, "Failed to answer form");
            if let Err(e) = interaction
                .create_followup(&ctx.http, convert::ephemeral_followup(RESPONSE_FAILURE))
                .await
            {
                tracing::warn!(error = %e, "Failed to send error follow-up");
            }
        }
    }
}

fn response(reply: &Reply) -> CreateInteractionResponse {
    match reply {
        Reply::Update(view) => CreateInteractionResponse::UpdateMessage(convert::response_message(view)),
        Reply::Send(view) => CreateInteractionResponse::Message(convert::response_message(view)),
        Reply::Form(form) => CreateInteractionResponse::Modal(convert::modal(form)),
        Reply::Ephemeral(text) => CreateInteractionResponse::Message(convert::ephemeral_message(text)),
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, guilds = ready.guilds.len(), "Gateway ready");
        ctx.set_activity(Some(ActivityData::watching(PRESENCE)));
        self.notifier.attach(ctx.http.clone(), ctx.cache.clone());
        self.state.mark_connected();

        for guild in &ready.guilds {
            self.seed(guild.id).await;
        }
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new == Some(true) {
            tracing::info!(community = %guild.id, name = %guild.name, "Joined community");
        }
        self.seed(guild.id).await;
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        // An unavailable guild is an outage, not a removal.
        if incomplete.unavailable {
            return;
        }
        let community = CommunityId(incomplete.id.get());
        self.state.inventory_service.forget(community).await;
        tracing::info!(community = %community, "Left community");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Component(component) => self.on_component(&ctx, &component).await,
            Interaction::Modal(modal) => self.on_modal(&ctx, &modal).await,
            _ => {}
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(guild) = msg.guild_id else {
            return;
        };
        let Some(response) = self
            .state
            .command_usecase
            .handle(CommunityId(guild.get()), &msg.content)
            .await
        else {
            return;
        };

        let sent = match response {
            CommandResponse::Menu(view) => {
                match msg
                    .channel_id
                    .send_message(&ctx.http, convert::channel_message(&view).reference_message(&msg))
                    .await
                {
                    Ok(menu) => {
                        self.state
                            .command_usecase
                            .menu_posted(UserId(msg.author.id.get()), menu.id.get())
                            .await;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            CommandResponse::Embed(view) => msg
                .channel_id
                .send_message(&ctx.http, convert::channel_message(&view).reference_message(&msg))
                .await
                .map(|_| ()),
            CommandResponse::Text(text) => msg.reply(&ctx.http, text).await.map(|_| ()),
        };
        if let Err(e) = sent {
            tracing::error!(community = %guild, error = %e, "Failed to answer command");
        }
    }
}
