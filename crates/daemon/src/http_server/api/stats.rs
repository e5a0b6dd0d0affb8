use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::RegistryError;

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::registry_error_response;
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub bucket_count: u64,
    pub item_count: u64,
}

/// Bucket and item totals across everything the caller owns.
pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse, StatsError> {
    let stats = state.stash().stats(principal)?;
    Ok((
        StatusCode::OK,
        Json(StatsResponse {
            bucket_count: stats.bucket_count,
            item_count: stats.item_count,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        match self {
            StatsError::Registry(err) => registry_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for StatsRequest {
    type Response = StatsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/stats").unwrap();
        client.get(full_url)
    }
}
