use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{DocumentMeta, RegistryError, StoreError};

use super::normalize_path;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{registry_error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

/// Client-side shape of a write; the server reads the bucket and path from
/// the URL and the payload from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    pub bucket_id: Uuid,
    pub path: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub path: String,
    #[serde(flatten)]
    pub meta: DocumentMeta,
}

#[axum::debug_handler]
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((bucket_id, path)): Path<(Uuid, String)>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, WriteError> {
    state.registry().get_for_access(bucket_id, principal)?;

    let path = normalize_path(&path);
    let meta = state.docs().write(bucket_id, &path, payload)?;

    Ok((StatusCode::OK, Json(WriteResponse { path, meta })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        match self {
            WriteError::Registry(err) => registry_error_response(&err),
            WriteError::Store(err) => store_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for WriteRequest {
    type Response = WriteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/buckets/{}/data{}",
                self.bucket_id,
                normalize_path(&self.path)
            ))
            .unwrap();
        client.put(full_url).json(&self.payload)
    }
}
