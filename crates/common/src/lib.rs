/**
 * Credential hashing plus session token issuance
 *  and verification. Tokens are self-contained:
 *  the engine holds no session table, so expiry
 *  is the only way a token dies.
 */
pub mod auth;
/**
 * Directory of registered principals, keyed by
 *  login. The only writer of principal records.
 */
pub mod directory;
/**
 * Registry of bucket metadata: owner, durability
 *  class, region, live item count. Ownership is
 *  checked here and nowhere else.
 */
pub mod registry;
/**
 * Path-addressed document storage, partitioned
 *  per bucket. The only writer of a bucket's
 *  item count.
 */
pub mod store;
/**
 * The assembled engine: directory, authenticator,
 *  registry, and document store wired together.
 */
pub mod stash;

pub mod prelude {
    pub use crate::auth::{AuthConfig, AuthError, Authenticator};
    pub use crate::directory::{DirectoryError, Principal, PrincipalDirectory};
    pub use crate::registry::{Bucket, BucketRegistry, DurabilityClass, RegistryError};
    pub use crate::stash::{Stash, StashStats};
    pub use crate::store::{
        BatchItemStatus, Document, DocumentMeta, DocumentStore, EntryInfo, StoreError,
    };
}
