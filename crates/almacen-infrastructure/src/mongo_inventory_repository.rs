//! MongoDB record store.
//!
//! Each community gets its own database named `{prefix}{community}` with a
//! `productos` collection holding one document per item.

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Collection};

use almacen_core::CommunityId;
use almacen_core::error::{AlmacenError, Result};
use almacen_core::inventory::{Inventory, InventoryRepository};

use crate::dto::StockRecordDto;
use crate::dto::stock_record::{
    COMMUNITY_FIELD, NAME_FIELD, PRICE_FIELD, QUANTITY_FIELD, UPDATED_FIELD,
};

const COLLECTION: &str = "productos";

/// [`InventoryRepository`] backed by a MongoDB deployment.
#[derive(Clone)]
pub struct MongoInventoryRepository {
    client: Client,
    prefix: String,
}

impl MongoInventoryRepository {
    /// Connects to `uri` and verifies the deployment answers a ping.
    pub async fn connect(uri: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AlmacenError::data_access(format!("Failed to connect: {e}")))?;
        let repository = Self {
            client,
            prefix: prefix.into(),
        };
        repository.ping().await?;
        Ok(repository)
    }

    fn database_name(&self, community: CommunityId) -> String {
        format!("{}{}", self.prefix, community)
    }

    fn collection(&self, community: CommunityId) -> Collection<Document> {
        self.client
            .database(&self.database_name(community))
            .collection(COLLECTION)
    }
}

#[async_trait]
impl InventoryRepository for MongoInventoryRepository {
    async fn load(&self, community: CommunityId) -> Result<Inventory> {
        let mut cursor = self
            .collection(community)
            .find(doc! {})
            .await
            .map_err(|e| AlmacenError::data_access(format!("Failed to query {COLLECTION}: {e}")))?;

        let mut inventory = Inventory::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| AlmacenError::data_access(format!("Failed to read {COLLECTION}: {e}")))?
        {
            let value = Bson::Document(document).into_relaxed_extjson();
            match StockRecordDto::parse_entry(&value) {
                Some((name, entry)) => inventory.insert(name, entry),
                None => tracing::warn!(community = %community, "Skipping record without a name"),
            }
        }
        Ok(inventory)
    }

    async fn save(&self, community: CommunityId, inventory: &Inventory) -> Result<()> {
        let collection = self.collection(community);
        let now = Utc::now();

        for record in StockRecordDto::from_inventory(community, inventory, now) {
            let (filter, update) = upsert_documents(&record);
            collection
                .update_one(filter, update)
                .upsert(true)
                .await
                .map_err(|e| {
                    AlmacenError::data_access(format!("Failed to upsert '{}': {e}", record.name))
                })?;
        }

        tracing::debug!(
            community = %community,
            database = %self.database_name(community),
            records = inventory.len(),
            "Saved inventory"
        );
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AlmacenError::data_access(format!("Ping failed: {e}")))?;
        Ok(())
    }
}

/// Filter and `$set` update for one record, keyed on the stored item name.
fn upsert_documents(record: &StockRecordDto) -> (Document, Document) {
    let mut filter = Document::new();
    filter.insert(NAME_FIELD, record.name.as_str());

    let mut fields = Document::new();
    fields.insert(QUANTITY_FIELD, i64::try_from(record.quantity).unwrap_or(i64::MAX));
    fields.insert(PRICE_FIELD, record.unit_price);
    fields.insert(
        UPDATED_FIELD,
        bson::DateTime::from_millis(record.last_updated.timestamp_millis()),
    );
    fields.insert(COMMUNITY_FIELD, record.community.as_str());
    (filter, doc! { "$set": fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use almacen_core::inventory::StockEntry;

    #[test]
    fn test_upsert_targets_existing_documents() {
        let record = StockRecordDto::new(
            CommunityId(424242),
            "glock",
            &StockEntry::new(3, 150.5),
            Utc::now(),
        );
        let (filter, update) = upsert_documents(&record);

        assert_eq!(filter, doc! { "nombre": "glock" });
        let fields = update.get_document("$set").unwrap();
        assert_eq!(fields.get_i64("cantidad").unwrap(), 3);
        assert_eq!(fields.get_f64("precio").unwrap(), 150.5);
        assert_eq!(fields.get_str("guildId").unwrap(), "424242");
        assert!(fields.get_datetime("ultimaActualizacion").is_ok());
    }

    #[test]
    fn test_stored_document_round_trips_through_parser() {
        let stored = doc! {
            "nombre": "chaleco",
            "cantidad": 4_i32,
            "precio": 80.0,
            "guildId": "1",
        };
        let value = Bson::Document(stored).into_relaxed_extjson();
        assert_eq!(
            StockRecordDto::parse_entry(&value),
            Some(("chaleco".to_string(), StockEntry::new(4, 80.0)))
        );
    }
}
