use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::registry::{BucketRegistry, RegistryError};

/// Metadata tracked alongside every document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub size_bytes: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A stored payload plus its metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub payload: Value,
    pub meta: DocumentMeta,
}

/// One row of a bucket listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInfo {
    pub path: String,
    pub size_bytes: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Per-item outcome of a batch write, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemStatus {
    pub path: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no bucket with id {0}")]
    BucketNotFound(Uuid),
    #[error("no document at path {0}")]
    NotFound(String),
    #[error("document path cannot be empty")]
    EmptyPath,
    #[error("payload cannot be serialized: {0}")]
    InvalidPayload(String),
    #[error("store lock poisoned")]
    LockPoisoned,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

type Partition = BTreeMap<String, Document>;

/// Path-addressed document storage, partitioned per bucket.
///
/// Each partition sits behind its own mutex: writers to the same bucket
/// serialize, unrelated buckets proceed in parallel. The live path count is
/// reported to the registry before the partition lock is released, which
/// keeps `item_count` in step with the map it describes.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    partitions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Partition>>>>>,
    registry: BucketRegistry,
}

impl DocumentStore {
    pub fn new(registry: BucketRegistry) -> Self {
        Self {
            partitions: Arc::new(RwLock::new(HashMap::new())),
            registry,
        }
    }

    /// Create an empty partition for a bucket. Must happen before the
    /// registry entry becomes visible.
    pub(crate) fn create_partition(&self, bucket_id: Uuid) -> Result<(), StoreError> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        partitions.insert(bucket_id, Arc::new(Mutex::new(Partition::new())));
        Ok(())
    }

    fn partition(&self, bucket_id: Uuid) -> Result<Arc<Mutex<Partition>>, StoreError> {
        let partitions = self
            .partitions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        partitions
            .get(&bucket_id)
            .cloned()
            .ok_or(StoreError::BucketNotFound(bucket_id))
    }

    /// Write a document, overwriting any existing payload at the path.
    /// `created_at` survives an overwrite; only `updated_at` moves.
    pub fn write(
        &self,
        bucket_id: Uuid,
        path: &str,
        payload: Value,
    ) -> Result<DocumentMeta, StoreError> {
        if path.is_empty() {
            return Err(StoreError::EmptyPath);
        }
        let size_bytes = serialized_size(&payload)?;

        let partition = self.partition(bucket_id)?;
        let mut docs = partition.lock().map_err(|_| StoreError::LockPoisoned)?;

        let now = OffsetDateTime::now_utc();
        let created_at = docs.get(path).map(|doc| doc.meta.created_at).unwrap_or(now);
        let meta = DocumentMeta {
            size_bytes,
            created_at,
            updated_at: now,
        };
        docs.insert(
            path.to_string(),
            Document {
                payload,
                meta: meta.clone(),
            },
        );
        self.registry.record_item_count(bucket_id, docs.len() as u64)?;
        tracing::debug!(bucket = %bucket_id, path, size_bytes, "wrote document");
        Ok(meta)
    }

    /// Exact-path lookup; there is no prefix or wildcard matching.
    pub fn read(&self, bucket_id: Uuid, path: &str) -> Result<Document, StoreError> {
        let partition = self.partition(bucket_id)?;
        let docs = partition.lock().map_err(|_| StoreError::LockPoisoned)?;
        docs.get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    /// Remove a document. Deleting an absent path is `NotFound`, including
    /// the second of two deletes on the same path.
    pub fn delete(&self, bucket_id: Uuid, path: &str) -> Result<(), StoreError> {
        let partition = self.partition(bucket_id)?;
        let mut docs = partition.lock().map_err(|_| StoreError::LockPoisoned)?;
        if docs.remove(path).is_none() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        self.registry.record_item_count(bucket_id, docs.len() as u64)?;
        tracing::debug!(bucket = %bucket_id, path, "deleted document");
        Ok(())
    }

    /// Every live document in the bucket, in path order.
    pub fn list(&self, bucket_id: Uuid) -> Result<Vec<EntryInfo>, StoreError> {
        let partition = self.partition(bucket_id)?;
        let docs = partition.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs
            .iter()
            .map(|(path, doc)| EntryInfo {
                path: path.clone(),
                size_bytes: doc.meta.size_bytes,
                created_at: doc.meta.created_at,
                updated_at: doc.meta.updated_at,
            })
            .collect())
    }

    pub fn item_count(&self, bucket_id: Uuid) -> Result<u64, StoreError> {
        let partition = self.partition(bucket_id)?;
        let docs = partition.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.len() as u64)
    }

    /// Apply writes in order, best effort. This is NOT atomic: a failed
    /// item does not roll back the ones before it. The caller gets one
    /// status per item, in input order.
    pub fn batch_write(
        &self,
        bucket_id: Uuid,
        items: Vec<(String, Value)>,
    ) -> Result<Vec<BatchItemStatus>, StoreError> {
        // Bucket existence is checked once up front; per-item failures land
        // in the statuses rather than aborting the batch.
        self.partition(bucket_id)?;

        let mut statuses = Vec::with_capacity(items.len());
        for (path, payload) in items {
            match self.write(bucket_id, &path, payload) {
                Ok(_) => statuses.push(BatchItemStatus {
                    path,
                    succeeded: true,
                    error: None,
                }),
                Err(err) => statuses.push(BatchItemStatus {
                    path,
                    succeeded: false,
                    error: Some(err.to_string()),
                }),
            }
        }
        Ok(statuses)
    }
}

fn serialized_size(payload: &Value) -> Result<u64, StoreError> {
    serde_json::to_vec(payload)
        .map(|bytes| bytes.len() as u64)
        .map_err(|e| StoreError::InvalidPayload(e.to_string()))
}
