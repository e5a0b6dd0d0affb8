use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::auth::AuthError;

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::error_response;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub principal_id: Uuid,
    pub token: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    // credential verification is as slow as hashing; run it off-runtime
    let auth = state.auth().clone();
    let (principal, token) =
        tokio::task::spawn_blocking(move || auth.login(&req.login, &req.secret))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))??;
    tracing::debug!(login = %principal.login, "login succeeded");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            principal_id: principal.id,
            token,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::Auth(AuthError::Unauthorized) => {
                error_response(StatusCode::UNAUTHORIZED, "unauthorized", "invalid login or secret")
            }
            LoginError::Auth(err) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal", err)
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for LoginRequest {
    type Response = LoginResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/auth/login").unwrap();
        client.post(full_url).json(&self)
    }
}
