use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{BatchItemStatus, RegistryError, StoreError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{registry_error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub path: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWriteRequest {
    #[serde(skip_serializing, default)]
    pub bucket_id: Uuid,
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWriteResponse {
    pub results: Vec<BatchItemStatus>,
}

/// Ordered best-effort batch write. This is NOT all-or-nothing: items apply
/// in input order and a failure partway leaves prior items committed. The
/// response carries one status per item so callers can see exactly what
/// landed.
#[axum::debug_handler]
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(bucket_id): Path<Uuid>,
    Json(req): Json<BatchWriteRequest>,
) -> Result<impl IntoResponse, BatchWriteError> {
    state.registry().get_for_access(bucket_id, principal)?;

    // empty paths stay empty so the store can report them as failed items
    let items = req
        .items
        .into_iter()
        .map(|item| {
            let path = if item.path.is_empty() {
                item.path
            } else {
                super::normalize_path(&item.path)
            };
            (path, item.payload)
        })
        .collect();
    let results = state.docs().batch_write(bucket_id, items)?;

    Ok((StatusCode::OK, Json(BatchWriteResponse { results })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum BatchWriteError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for BatchWriteError {
    fn into_response(self) -> Response {
        match self {
            BatchWriteError::Registry(err) => registry_error_response(&err),
            BatchWriteError::Store(err) => store_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for BatchWriteRequest {
    type Response = BatchWriteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/buckets/{}/batch-write", self.bucket_id))
            .unwrap();
        client.post(full_url).json(&self)
    }
}
