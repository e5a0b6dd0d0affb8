use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Bucket, RegistryError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::registry_error_response;
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub buckets: Vec<Bucket>,
}

/// Every bucket the caller owns, in creation order. Always a sequence;
/// owning nothing is an empty list, not an error.
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse, ListError> {
    let buckets = state.registry().list(principal)?;
    Ok((StatusCode::OK, Json(ListResponse { buckets })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match self {
            ListError::Registry(err) => registry_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/buckets").unwrap();
        client.get(full_url)
    }
}
