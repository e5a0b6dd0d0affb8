use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthConfig, Authenticator};
use crate::directory::PrincipalDirectory;
use crate::registry::{Bucket, BucketRegistry, DurabilityClass, RegistryError, DEFAULT_REGION};
use crate::store::{DocumentStore, StoreError};

/// Aggregate usage numbers for one principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashStats {
    pub bucket_count: u64,
    pub item_count: u64,
}

/// The assembled engine: principal directory, authenticator, bucket
/// registry, and document store wired together. Construct one at process
/// startup; all request handling shares it. There are no ambient globals.
#[derive(Debug, Clone)]
pub struct Stash {
    auth: Authenticator,
    registry: BucketRegistry,
    docs: DocumentStore,
}

impl Stash {
    pub fn new(config: AuthConfig) -> Self {
        let registry = BucketRegistry::new();
        let docs = DocumentStore::new(registry.clone());
        let auth = Authenticator::new(PrincipalDirectory::new(), config);
        Self {
            auth,
            registry,
            docs,
        }
    }

    pub fn auth(&self) -> &Authenticator {
        &self.auth
    }

    pub fn registry(&self) -> &BucketRegistry {
        &self.registry
    }

    pub fn docs(&self) -> &DocumentStore {
        &self.docs
    }

    /// Create a bucket owned by `owner`. The document partition is created
    /// before the registry entry becomes visible, so there is no window in
    /// which a bucket exists without its partition.
    pub fn create_bucket(
        &self,
        owner: Uuid,
        name: &str,
        durability: Option<DurabilityClass>,
        region: Option<String>,
    ) -> Result<Bucket, StoreError> {
        let bucket = Bucket::new(
            owner,
            name,
            durability.unwrap_or_default(),
            region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        );
        self.docs.create_partition(bucket.id)?;
        self.registry.insert(bucket.clone())?;
        tracing::info!(bucket = %bucket.id, owner = %owner, name, "created bucket");
        Ok(bucket)
    }

    /// Bucket and item totals across everything `principal` owns.
    pub fn stats(&self, principal: Uuid) -> Result<StashStats, RegistryError> {
        let buckets = self.registry.list(principal)?;
        Ok(StashStats {
            bucket_count: buckets.len() as u64,
            item_count: buckets.iter().map(|b| b.item_count).sum(),
        })
    }
}
