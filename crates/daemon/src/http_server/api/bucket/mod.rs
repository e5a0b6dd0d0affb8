use axum::routing::{get, post, put};
use axum::Router;

use crate::ServiceState;

pub mod batch_write;
pub mod create;
pub mod delete;
pub mod items;
pub mod list;
pub mod read;
pub mod vector_search;
pub mod write;

// Re-export for convenience
pub use create::CreateRequest;
pub use write::WriteRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler).get(list::handler))
        .route(
            "/:bucket_id/data/*path",
            put(write::handler)
                .get(read::handler)
                .delete(delete::handler),
        )
        .route("/:bucket_id/items", get(items::handler))
        .route("/:bucket_id/batch-write", post(batch_write::handler))
        .route("/:bucket_id/vector-search", post(vector_search::handler))
        .with_state(state)
}

/// Wildcard captures arrive without their leading slash; stored paths are
/// always absolute within the bucket.
pub(crate) fn normalize_path(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}
