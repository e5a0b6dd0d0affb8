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
pub struct RegisterRequest {
    /// Login identifier (e.g. an email address)
    pub login: String,
    /// Secret used for future logins
    pub secret: String,
    /// Human-readable display name
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub principal_id: Uuid,
    pub token: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterError> {
    if req.login.is_empty() || req.secret.is_empty() {
        return Err(RegisterError::MissingField);
    }

    // argon2 is slow on purpose; keep it off the runtime threads
    let auth = state.auth().clone();
    let (principal, token) = tokio::task::spawn_blocking(move || {
        auth.register(&req.login, &req.secret, &req.display_name)
    })
    .await
    .map_err(|e| AuthError::Internal(e.to_string()))??;
    tracing::info!(login = %principal.login, id = %principal.id, "registered principal");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            principal_id: principal.id,
            token,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("login and secret are required")]
    MissingField,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        match self {
            RegisterError::MissingField => {
                error_response(StatusCode::BAD_REQUEST, "bad_request", self)
            }
            RegisterError::Auth(AuthError::Conflict) => {
                error_response(StatusCode::CONFLICT, "conflict", "login is already registered")
            }
            RegisterError::Auth(AuthError::Unauthorized) => {
                error_response(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials")
            }
            RegisterError::Auth(err) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal", err)
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/auth/register").unwrap();
        client.post(full_url).json(&self)
    }
}
