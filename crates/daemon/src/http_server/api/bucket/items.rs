use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{EntryInfo, RegistryError, StoreError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{registry_error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsRequest {
    pub bucket_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<EntryInfo>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(bucket_id): Path<Uuid>,
) -> Result<impl IntoResponse, ItemsError> {
    state.registry().get_for_access(bucket_id, principal)?;

    let items = state.docs().list(bucket_id)?;
    Ok((StatusCode::OK, Json(ItemsResponse { items })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ItemsError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ItemsError {
    fn into_response(self) -> Response {
        match self {
            ItemsError::Registry(err) => registry_error_response(&err),
            ItemsError::Store(err) => store_error_response(&err),
        }
    }
}

impl ApiRequest for ItemsRequest {
    type Response = ItemsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/buckets/{}/items", self.bucket_id))
            .unwrap();
        client.get(full_url)
    }
}
