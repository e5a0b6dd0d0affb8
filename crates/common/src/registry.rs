use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Region a bucket is created in when the caller does not pick one.
pub const DEFAULT_REGION: &str = "local";

/// Storage-tier label on a bucket. Carried through verbatim; no class
/// behaves differently in this engine (reserved for storage-tier routing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DurabilityClass {
    Standard,
    Absolute,
    /// Any other caller-supplied label.
    Custom(String),
}

impl Default for DurabilityClass {
    fn default() -> Self {
        DurabilityClass::Standard
    }
}

impl From<String> for DurabilityClass {
    fn from(s: String) -> Self {
        match s.as_str() {
            "standard" => DurabilityClass::Standard,
            "absolute" => DurabilityClass::Absolute,
            _ => DurabilityClass::Custom(s),
        }
    }
}

impl From<DurabilityClass> for String {
    fn from(class: DurabilityClass) -> Self {
        match class {
            DurabilityClass::Standard => "standard".to_string(),
            DurabilityClass::Absolute => "absolute".to_string(),
            DurabilityClass::Custom(s) => s,
        }
    }
}

/// Bucket metadata as held by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub id: Uuid,
    pub name: String,
    pub owner: Uuid,
    pub durability: DurabilityClass,
    pub region: String,
    pub item_count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Bucket {
    pub fn new(owner: Uuid, name: &str, durability: DurabilityClass, region: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner,
            durability,
            region,
            item_count: 0,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no bucket with id {0}")]
    NotFound(Uuid),
    #[error("bucket {0} is not owned by the caller")]
    Forbidden(Uuid),
    #[error("registry lock poisoned")]
    LockPoisoned,
}

/// Registry of bucket metadata.
///
/// The owner is immutable once set. Item counts are written only through
/// [`record_item_count`](BucketRegistry::record_item_count), which the
/// document store calls after every mutation.
#[derive(Debug, Clone, Default)]
pub struct BucketRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    buckets: HashMap<Uuid, Bucket>,
    /// Creation order, for stable listing.
    order: Vec<Uuid>,
}

impl BucketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a bucket visible. Callers must have created the document
    /// partition first; see [`Stash::create_bucket`](crate::stash::Stash::create_bucket).
    pub(crate) fn insert(&self, bucket: Bucket) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().map_err(|_| RegistryError::LockPoisoned)?;
        inner.order.push(bucket.id);
        inner.buckets.insert(bucket.id, bucket);
        Ok(())
    }

    /// Every bucket owned by `principal`, in creation order. Empty vec when
    /// there are none.
    pub fn list(&self, principal: Uuid) -> Result<Vec<Bucket>, RegistryError> {
        let inner = self.inner.read().map_err(|_| RegistryError::LockPoisoned)?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.buckets.get(id))
            .filter(|bucket| bucket.owner == principal)
            .cloned()
            .collect())
    }

    /// The single authorization gate: every document operation passes
    /// through here before touching storage. Unknown bucket is `NotFound`;
    /// known bucket with a different owner is `Forbidden`.
    pub fn get_for_access(&self, bucket_id: Uuid, principal: Uuid) -> Result<Bucket, RegistryError> {
        let inner = self.inner.read().map_err(|_| RegistryError::LockPoisoned)?;
        let bucket = inner
            .buckets
            .get(&bucket_id)
            .ok_or(RegistryError::NotFound(bucket_id))?;
        if bucket.owner != principal {
            return Err(RegistryError::Forbidden(bucket_id));
        }
        Ok(bucket.clone())
    }

    /// Overwrite a bucket's live item count. Called by the document store
    /// while it still holds the partition lock, so the count never drifts
    /// from the map it describes.
    pub(crate) fn record_item_count(&self, bucket_id: Uuid, count: u64) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().map_err(|_| RegistryError::LockPoisoned)?;
        let bucket = inner
            .buckets
            .get_mut(&bucket_id)
            .ok_or(RegistryError::NotFound(bucket_id))?;
        bucket.item_count = count;
        Ok(())
    }
}
