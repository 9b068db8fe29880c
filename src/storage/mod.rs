pub mod memory_store;
pub mod minio_store;
pub mod storage_manager;

pub use memory_store::MemoryStore;
pub use minio_store::MinioStore;
pub use storage_manager::StorageManager;

use crate::models::ReviewRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

/// A schemaless document store addressed by collection name.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends records to a collection. Inserting nothing is a no-op.
    async fn bulk_insert(&self, records: &[Value], collection: &str) -> Result<()>;

    /// Returns every record of a collection; an absent collection is empty.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>>;
}

pub async fn insert_reviews(
    store: &dyn DocumentStore,
    reviews: &[ReviewRecord],
    collection: &str,
) -> Result<usize> {
    let documents = reviews
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize review records")?;

    store.bulk_insert(&documents, collection).await?;
    info!("Inserted {} reviews into '{}'", documents.len(), collection);
    Ok(documents.len())
}

/// Loads a collection as review records.
///
/// Every JSON object becomes a review, whatever its field types; only
/// documents that are not objects at all (bare strings, arrays) are skipped.
pub async fn load_reviews(store: &dyn DocumentStore, collection: &str) -> Result<Vec<ReviewRecord>> {
    let documents = store
        .find_all(collection)
        .await
        .with_context(|| format!("Failed to read collection '{}'", collection))?;

    let mut reviews = Vec::with_capacity(documents.len());
    let mut skipped = 0;

    for (index, document) in documents.into_iter().enumerate() {
        match serde_json::from_value::<ReviewRecord>(document) {
            Ok(review) => reviews.push(review),
            Err(e) => {
                skipped += 1;
                warn!("Skipping document {} in '{}': {}", index, collection, e);
            }
        }
    }

    info!(
        "Loaded {} reviews from '{}' ({} skipped)",
        reviews.len(),
        collection,
        skipped
    );
    Ok(reviews)
}
