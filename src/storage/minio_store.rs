use super::{DocumentStore, StorageManager};
use crate::config::MinioConfig;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use serde_json::Value;
use tracing::{debug, info};

/// Document store on an S3/MinIO bucket.
///
/// Every `bulk_insert` becomes one JSON array object under
/// `collections/<name>/`; `find_all` concatenates them in key order.
pub struct MinioStore {
    bucket: Bucket,
}

impl MinioStore {
    pub fn from_config(config: &MinioConfig) -> Result<Self> {
        config.validate()?;
        let (access_key, secret_key) = config.credentials()?;

        let region = Region::Custom {
            region: config.get_region().to_owned(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .context("Invalid MinIO credentials")?;

        let mut bucket = Bucket::new(&config.bucket_name, region, credentials)
            .with_context(|| format!("Failed to open bucket '{}'", config.bucket_name))?;
        if config.is_path_style() {
            bucket = bucket.with_path_style();
        }

        Ok(MinioStore { bucket: *bucket })
    }

    /// Creates the bucket on first use so `find_all` can list it.
    pub async fn ensure_bucket(&self) -> Result<()> {
        let name = &self.bucket.name;
        let exists = self
            .bucket
            .exists()
            .await
            .with_context(|| format!("Failed to check whether bucket '{}' exists", name))?;

        if exists {
            debug!("Bucket '{}' is ready", name);
            return Ok(());
        }

        let credentials = self.bucket.credentials().await?;
        s3::Bucket::create(
            name,
            self.bucket.region.clone(),
            credentials,
            s3::BucketConfiguration::default(),
        )
        .await
        .with_context(|| format!("Failed to create bucket '{}'", name))?;

        info!("Created bucket '{}' for review collections", name);
        Ok(())
    }

    pub async fn put_object(&self, key: &str, data: &[u8]) -> Result<()> {
        let response = self.bucket.put_object(key, data).await?;

        if response.status_code() == 200 {
            debug!("Stored object: {}", key);
            Ok(())
        } else {
            Err(anyhow!(
                "Failed to store object {}: HTTP {}",
                key,
                response.status_code()
            ))
        }
    }

    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self.bucket.get_object(key).await?;

        if response.status_code() == 200 {
            Ok(response.bytes().to_vec())
        } else {
            Err(anyhow!(
                "Failed to get object {}: HTTP {}",
                key,
                response.status_code()
            ))
        }
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let list = self.bucket.list(prefix.to_string(), None).await?;

        let mut keys: Vec<String> = list
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn read_batch(&self, key: &str) -> Result<Vec<Value>> {
        let bytes = self.get_object(key).await?;
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse batch {}", key))
    }

    pub fn get_bucket_name(&self) -> &str {
        &self.bucket.name
    }
}

#[async_trait]
impl DocumentStore for MinioStore {
    async fn bulk_insert(&self, records: &[Value], collection: &str) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let key = StorageManager::batch_key(collection, Utc::now());
        let body = serde_json::to_vec(records)?;
        self.put_object(&key, &body).await?;
        info!("Stored {} records at {}", records.len(), key);
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        let keys = self
            .list_keys(&StorageManager::collection_prefix(collection))
            .await?;

        if keys.is_empty() {
            info!("Collection '{}' has no stored batches", collection);
            return Ok(Vec::new());
        }

        let batches = try_join_all(keys.iter().map(|key| self.read_batch(key))).await?;
        Ok(batches.into_iter().flatten().collect())
    }
}
