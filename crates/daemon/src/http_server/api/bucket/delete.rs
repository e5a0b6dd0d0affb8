use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{RegistryError, StoreError};

use super::normalize_path;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{registry_error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub bucket_id: Uuid,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub path: String,
}

/// Remove one document. Deleting a path that is not there, including a path
/// already deleted once, is 404 - absence is not idempotent success here.
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path((bucket_id, path)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, DeleteError> {
    state.registry().get_for_access(bucket_id, principal)?;

    let path = normalize_path(&path);
    state.docs().delete(bucket_id, &path)?;

    Ok((StatusCode::OK, Json(DeleteResponse { path })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match self {
            DeleteError::Registry(err) => registry_error_response(&err),
            DeleteError::Store(err) => store_error_response(&err),
        }
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/buckets/{}/data{}",
                self.bucket_id,
                normalize_path(&self.path)
            ))
            .unwrap();
        client.delete(full_url)
    }
}
