use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::Rng;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{RegistryError, StoreError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{registry_error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchRequest {
    #[serde(skip_serializing, default)]
    pub bucket_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResult {
    pub path: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResponse {
    pub results: Vec<VectorSearchResult>,
}

/// Placeholder search endpoint. This is NOT a similarity search: it returns
/// up to `top_k` arbitrary items from the bucket with a non-deterministic,
/// non-semantic score. Only the endpoint shape is stable; semantic ranking
/// is unimplemented.
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(bucket_id): Path<Uuid>,
    Json(req): Json<VectorSearchRequest>,
) -> Result<impl IntoResponse, VectorSearchError> {
    state.registry().get_for_access(bucket_id, principal)?;

    let top_k = req.top_k.unwrap_or(DEFAULT_TOP_K);
    let mut rng = rand::thread_rng();
    let results = state
        .docs()
        .list(bucket_id)?
        .into_iter()
        .take(top_k)
        .map(|entry| VectorSearchResult {
            path: entry.path,
            score: rng.gen_range(0.0..1.0),
        })
        .collect();

    Ok((StatusCode::OK, Json(VectorSearchResponse { results })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum VectorSearchError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for VectorSearchError {
    fn into_response(self) -> Response {
        match self {
            VectorSearchError::Registry(err) => registry_error_response(&err),
            VectorSearchError::Store(err) => store_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for VectorSearchRequest {
    type Response = VectorSearchResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/buckets/{}/vector-search", self.bucket_id))
            .unwrap();
        client.post(full_url).json(&self)
    }
}
