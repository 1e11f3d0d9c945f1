//! JSON-directory record store.
//!
//! Each community's table is one JSON document holding an array of stock
//! records:
//!
//! ```text
//! {base_dir}/{prefix}{community}.json
//! ```
//!
//! Documents are kept as raw JSON values so that malformed records written
//! by other tools survive a save untouched.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use almacen_core::CommunityId;
use almacen_core::error::Result;
use almacen_core::inventory::{Inventory, InventoryRepository};

use crate::dto::{StockRecordDto, inventory_from_documents, record_name};
use crate::storage::AtomicJsonFile;

/// File-backed [`InventoryRepository`].
pub struct AsyncDirInventoryRepository {
    base_dir: PathBuf,
    prefix: String,
    /// Serializes read-modify-write cycles on the documents.
    write_lock: Arc<Mutex<()>>,
}

impl AsyncDirInventoryRepository {
    /// Creates a repository rooted at `base_dir`, creating the directory.
    pub async fn new(base_dir: PathBuf, prefix: impl Into<String>) -> Result<Self> {
        tokio::fs::create_dir_all(&base_dir).await?;
        Ok(Self::with_base_path(base_dir, prefix))
    }

    /// Creates a repository without touching the filesystem (for testing).
    pub fn with_base_path(base_dir: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            base_dir,
            prefix: prefix.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn table(&self, community: CommunityId) -> AtomicJsonFile<Vec<Value>> {
        AtomicJsonFile::new(
            self.base_dir
                .join(format!("{}{}.json", self.prefix, community)),
        )
    }
}

#[async_trait]
impl InventoryRepository for AsyncDirInventoryRepository {
    async fn load(&self, community: CommunityId) -> Result<Inventory> {
        let documents = self.table(community).load().await?.unwrap_or_default();
        Ok(inventory_from_documents(documents.iter()))
    }

    async fn save(&self, community: CommunityId, inventory: &Inventory) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let table = self.table(community);
        let mut documents = table.load().await?.unwrap_or_default();

        let index: HashMap<String, usize> = documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| Some((record_name(doc)?.to_string(), i)))
            .collect();

        let now = Utc::now();
        for record in StockRecordDto::from_inventory(community, inventory, now) {
            let position = index.get(&record.name).copied();
            let value = serde_json::to_value(record)?;
            match position {
                Some(i) => documents[i] = value,
                None => documents.push(value),
            }
        }

        table.save(&documents).await?;
        tracing::debug!(
            community = %community,
            records = inventory.len(),
            path = %table.path().display(),
            "Saved inventory"
        );
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        tokio::fs::metadata(&self.base_dir).await?;
        Ok(())
    }
}
