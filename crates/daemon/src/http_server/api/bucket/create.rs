use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{Bucket, DurabilityClass, StoreError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{error_response, store_error_response};
use crate::http_server::AuthPrincipal;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Name of the bucket to create (not required to be unique)
    pub name: String,
    /// Optional durability class label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<DurabilityClass>,
    /// Optional placement region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub bucket: Bucket,
}

pub async fn handler(
    State(state): State<ServiceState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(req): Json<CreateRequest>,
) -> Result<impl IntoResponse, CreateError> {
    if req.name.is_empty() {
        return Err(CreateError::InvalidName);
    }

    let bucket = state
        .stash()
        .create_bucket(principal, &req.name, req.durability, req.region)?;

    Ok((StatusCode::CREATED, Json(CreateResponse { bucket })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("bucket name cannot be empty")]
    InvalidName,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::InvalidName => {
                error_response(StatusCode::BAD_REQUEST, "bad_request", self)
            }
            CreateError::Store(err) => store_error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/buckets").unwrap();
        client.post(full_url).json(&self)
    }
}
