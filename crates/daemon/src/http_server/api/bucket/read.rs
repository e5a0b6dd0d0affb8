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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub bucket_id: Uuid,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub path: String,
    pub payload: serde_json::Value,
    #[serde(flatten)]
    pub meta: DocumentMeta,
}

/// Exact-path read; no prefix or wildcard matching.
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((bucket_id, path)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ReadError> {
    state.registry().get_for_access(bucket_id, principal)?;

    let path = normalize_path(&path);
    let doc = state.docs().read(bucket_id, &path)?;

    Ok((
        StatusCode::OK,
        Json(ReadResponse {
            path,
            payload: doc.payload,
            meta: doc.meta,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        match self {
            ReadError::Registry(err) => registry_error_response(&err),
            ReadError::Store(err) => store_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for ReadRequest {
    type Response = ReadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/buckets/{}/data{}",
                self.bucket_id,
                normalize_path(&self.path)
            ))
            .unwrap();
        client.get(full_url)
    }
}
