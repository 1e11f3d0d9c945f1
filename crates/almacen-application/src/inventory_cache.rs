use almacen_core::CommunityId;
use almacen_core::error::Result;
use almacen_core::inventory::{Inventory, InventoryRepository, Mutation, MutationOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Result of re-persisting every cached community.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub saved: usize,
    pub failed: usize,
}

/// In-memory mirror of every community's inventory.
///
/// Entries are hydrated from the record store on first access and written
/// through on every applied mutation. Writes to one community are
/// serialized by a per-community writer lock held across apply and save,
/// so saves reach the store in the order the mutations were applied. The
/// map lock itself is never held while the store is awaited, so readers
/// are not blocked by a slow store.
pub struct InventoryCache {
    repository: Arc<dyn InventoryRepository>,
    inventories: Arc<RwLock<HashMap<CommunityId, Inventory>>>,
    writers: Mutex<HashMap<CommunityId, Arc<Mutex<()>>>>,
}

impl InventoryCache {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self {
            repository,
            inventories: Arc::new(RwLock::new(HashMap::new())),
            writers: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a snapshot of the community's inventory, hydrating it first if needed.
    ///
    /// A failed load is returned as an error and nothing is cached, so a
    /// later access retries the load.
    pub async fn get(&self, community: CommunityId) -> Result<Inventory> {
        if let Some(inventory) = self.inventories.read().await.get(&community) {
            return Ok(inventory.clone());
        }
        self.hydrate(community).await
    }

    async fn hydrate(&self, community: CommunityId) -> Result<Inventory> {
        let loaded = self.repository.load(community).await?;
        let mut inventories = self.inventories.write().await;
        // Another task may have hydrated (and mutated) the entry meanwhile.
        let inventory = inventories.entry(community).or_insert_with(|| {
            tracing::info!(community = %community, items = loaded.len(), "Inventory loaded");
            loaded
        });
        Ok(inventory.clone())
    }

    async fn ensure_hydrated(&self, community: CommunityId) -> Result<()> {
        if !self.inventories.read().await.contains_key(&community) {
            self.hydrate(community).await?;
        }
        Ok(())
    }

    async fn writer(&self, community: CommunityId) -> Arc<Mutex<()>> {
        self.writers
            .lock()
            .await
            .entry(community)
            .or_default()
            .clone()
    }

    /// Puts `previous` back after a failed save. Only called with the
    /// community's writer lock held.
    async fn restore(&self, community: CommunityId, previous: Inventory) {
        if let Some(inventory) = self.inventories.write().await.get_mut(&community) {
            *inventory = previous;
            tracing::warn!(community = %community, "Save failed, cached inventory rolled back");
        }
    }

    /// Inserts every absent catalog item at {0, 0} and persists if anything changed.
    pub async fn seed_missing(&self, community: CommunityId) -> Result<usize> {
        let writer = self.writer(community).await;
        let _writing = writer.lock().await;
        self.ensure_hydrated(community).await?;

        let (inserted, previous, snapshot) = {
            let mut inventories = self.inventories.write().await;
            let inventory = inventories.entry(community).or_default();
            let previous = inventory.clone();
            let inserted = inventory.seed_missing();
            (inserted, previous, inventory.clone())
        };
        if inserted == 0 {
            return Ok(0);
        }
        if let Err(e) = self.repository.save(community, &snapshot).await {
            self.restore(community, previous).await;
            return Err(e);
        }
        tracing::info!(community = %community, inserted, "Seeded missing catalog items");
        Ok(inserted)
    }

    /// Applies `mutation` and writes the result through to the record store.
    ///
    /// Validation errors leave both the cache and the store untouched. An
    /// insufficient-stock outcome changes nothing and is not persisted. If
    /// the save fails the cached entry is rolled back and the error returned.
    pub async fn mutate(&self, community: CommunityId, mutation: &Mutation) -> Result<MutationOutcome> {
        let writer = self.writer(community).await;
        let _writing = writer.lock().await;
        self.ensure_hydrated(community).await?;

        let (outcome, previous, snapshot) = {
            let mut inventories = self.inventories.write().await;
            let inventory = inventories.entry(community).or_default();
            let previous = inventory.clone();
            let outcome = inventory.apply(mutation)?;
            (outcome, previous, inventory.clone())
        };
        if !outcome.is_applied() {
            return Ok(outcome);
        }
        if let Err(e) = self.repository.save(community, &snapshot).await {
            self.restore(community, previous).await;
            return Err(e);
        }
        Ok(outcome)
    }

    /// Re-persists one cached community. Uncached communities are skipped.
    pub async fn flush(&self, community: CommunityId) -> Result<()> {
        let writer = self.writer(community).await;
        let _writing = writer.lock().await;
        let snapshot = self.inventories.read().await.get(&community).cloned();
        if let Some(snapshot) = snapshot {
            self.repository.save(community, &snapshot).await?;
        }
        Ok(())
    }

    /// Re-persists every cached community once.
    ///
    /// Failures are logged per community and do not stop the others.
    pub async fn flush_all(&self) -> FlushReport {
        let mut report = FlushReport::default();
        for community in self.communities().await {
            match self.flush(community).await {
                Ok(()) => report.saved += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(community = %community, error = %e, "Failed to save inventory")
                }
            }
        }
        report
    }

    /// Drops the cached entry. Persisted data is kept.
    pub async fn evict(&self, community: CommunityId) -> bool {
        self.inventories.write().await.remove(&community).is_some()
    }

    pub async fn communities(&self) -> Vec<CommunityId> {
        self.inventories.read().await.keys().copied().collect()
    }

    pub async fn is_cached(&self, community: CommunityId) -> bool {
        self.inventories.read().await.contains_key(&community)
    }
}
