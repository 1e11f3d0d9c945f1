//! Routing of button presses and form submissions.

use std::sync::Arc;

use almacen_core::error::{AlmacenError, Result};
use almacen_core::navigation::{
    Action, NavigationSession, SessionStore, Transition, transition,
};
use almacen_core::{CommunityId, UserId};

use crate::activity::ActivityTracker;
use crate::inventory_service::InventoryService;
use crate::render;
use crate::view::Reply;

/// Who acted, where, and on which message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionContext {
    pub community: CommunityId,
    pub user: UserId,
    /// Message carrying the pressed button, if the interaction came from one.
    pub message_id: Option<u64>,
}

/// Turns action identifiers into replies.
///
/// Every call produces a [`Reply`]: validation failures become an
/// ephemeral explanation and infrastructure failures are logged and
/// answered with a generic ephemeral message. Neither changes any state.
pub struct InteractionUseCase {
    inventory: InventoryService,
    sessions: Arc<dyn SessionStore>,
    activity: Arc<ActivityTracker>,
}

impl InteractionUseCase {
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

    /// Handles a button press carrying `custom_id`.
    pub async fn handle_component(&self, ctx: InteractionContext, custom_id: &str) -> Reply {
        self.activity.record();
        let result = self.route_component(ctx, custom_id).await;
        self.finish(ctx, custom_id, result)
    }

    /// Handles a submitted form; `price_input` is the value of the price field.
    pub async fn handle_form(
        &self,
        ctx: InteractionContext,
        custom_id: &str,
        price_input: Option<&str>,
    ) -> Reply {
        self.activity.record();
        let result = self.route_form(ctx, custom_id, price_input).await;
        self.finish(ctx, custom_id, result)
    }

    async fn route_component(&self, ctx: InteractionContext, custom_id: &str) -> Result<Reply> {
        let action = Action::parse(custom_id)?;
        let current = self.sessions.get(ctx.user).await;

        match transition(current.as_ref(), &action)? {
            Transition::Navigate(screen) => {
                let inventory = self.inventory.inventory(ctx.community).await?;
                let view = render::screen(&screen, &inventory);
                // A component always carries its message; fall back to the
                // one already tracked otherwise.
                let message_id = ctx
                    .message_id
                    .or_else(|| current.and_then(|session| session.message_id));
                self.sessions
                    .put(ctx.user, NavigationSession::new(screen, message_id))
                    .await;
                Ok(Reply::Update(view))
            }
            Transition::Stay => match action {
                Action::FullStock => {
                    let inventory = self.inventory.inventory(ctx.community).await?;
                    Ok(Reply::Update(render::full_stock(&inventory)))
                }
                Action::OpenPrice { item } => Ok(Reply::Form(render::price_form(&item))),
                Action::Quantity {
                    operation,
                    item,
                    amount,
                } => {
                    let outcome = self
                        .inventory
                        .change_stock(ctx.community, ctx.user, operation, &item, amount)
                        .await?;
                    Ok(Reply::Update(render::outcome(&outcome)))
                }
                // Forms are submitted through `handle_form`, never as buttons.
                _ => Err(AlmacenError::InvalidAction(custom_id.to_string())),
            },
        }
    }

    async fn route_form(
        &self,
        ctx: InteractionContext,
        custom_id: &str,
        price_input: Option<&str>,
    ) -> Result<Reply> {
        let Action::SubmitPrice { item } = Action::parse(custom_id)? else {
            return Err(AlmacenError::InvalidAction(custom_id.to_string()));
        };
        let raw = price_input.unwrap_or_default();
        let outcome = self
            .inventory
            .set_price(ctx.community, ctx.user, &item, raw)
            .await?;
        Ok(Reply::Send(render::outcome(&outcome)))
    }

    fn finish(&self, ctx: InteractionContext, custom_id: &str, result: Result<Reply>) -> Reply {
        match result {
            Ok(reply) => reply,
            Err(e) if e.is_validation() => {
                tracing::debug!(
                    community = %ctx.community,
                    user = %ctx.user,
                    custom_id,
                    error = %e,
                    "Rejected interaction"
                );
                Reply::Ephemeral(render::error_message(&e))
            }
            Err(e) => {
                tracing::error!(
                    community = %ctx.community,
                    user = %ctx.user,
                    custom_id,
                    error = %e,
                    "Interaction failed"
                );
                Reply::Ephemeral(render::error_message(&e))
            }
        }
    }
}
