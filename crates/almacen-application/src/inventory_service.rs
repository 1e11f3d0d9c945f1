//! Inventory operations as seen by the routers.

use std::sync::Arc;

use almacen_core::CommunityId;
use almacen_core::UserId;
use almacen_core::error::Result;
use almacen_core::inventory::{Inventory, Mutation, MutationOutcome, StockOperation, parse_price};

use crate::inventory_cache::InventoryCache;

/// Runs the mutation engine against the write-through cache and logs
/// every applied change.
#[derive(Clone)]
pub struct InventoryService {
    cache: Arc<InventoryCache>,
}

impl InventoryService {
    pub fn new(cache: Arc<InventoryCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<InventoryCache> {
        &self.cache
    }

    pub async fn inventory(&self, community: CommunityId) -> Result<Inventory> {
        self.cache.get(community).await
    }

    /// Adds or removes `amount` units of `item`.
    pub async fn change_stock(
        &self,
        community: CommunityId,
        user: UserId,
        operation: StockOperation,
        item: &str,
        amount: u64,
    ) -> Result<MutationOutcome> {
        self.apply(community, user, Mutation::stock(operation, item, amount))
            .await
    }

    /// Parses `raw` as a price and sets it as the unit price of `item`.
    pub async fn set_price(
        &self,
        community: CommunityId,
        user: UserId,
        item: &str,
        raw: &str,
    ) -> Result<MutationOutcome> {
        let price = parse_price(raw)?;
        self.apply(
            community,
            user,
            Mutation::SetPrice {
                item: item.to_string(),
                price,
            },
        )
        .await
    }

    async fn apply(
        &self,
        community: CommunityId,
        user: UserId,
        mutation: Mutation,
    ) -> Result<MutationOutcome> {
        let outcome = self.cache.mutate(community, &mutation).await?;
        match &outcome {
            MutationOutcome::Added { item, added, quantity } => {
                tracing::info!(community = %community, user = %user, item = %item, added, quantity, "Stock added");
            }
            MutationOutcome::Removed { item, removed, remaining, total, .. } => {
                tracing::info!(community = %community, user = %user, item = %item, removed, remaining, total, "Stock removed");
            }
            MutationOutcome::InsufficientStock { item, requested, available } => {
                tracing::debug!(community = %community, user = %user, item = %item, requested, available, "Insufficient stock");
            }
            MutationOutcome::PriceSet { item, unit_price } => {
                tracing::info!(community = %community, user = %user, item = %item, unit_price, "Price updated");
            }
        }
        Ok(outcome)
    }

    /// Provisions the catalog for a community the bot has just seen.
    pub async fn seed(&self, community: CommunityId) -> Result<usize> {
        self.cache.seed_missing(community).await
    }

    /// Forgets a community the bot has left. Stored records are kept.
    pub async fn forget(&self, community: CommunityId) {
        if self.cache.evict(community).await {
            tracing::info!(community = %community, "Inventory cache evicted");
        }
    }
}
