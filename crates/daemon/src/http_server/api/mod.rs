use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

pub mod auth;
pub mod bucket;
pub mod client;
pub mod stats;

use common::prelude::{RegistryError, StoreError};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(vec![ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/buckets", bucket::router(state.clone()))
        .route("/stats", get(stats::handler))
        .with_state(state)
        .layer(cors_layer)
}

/// Uniform error body: `{ "error": <kind>, "msg": <detail> }`. Clients
/// dispatch on the kind, never on the message text.
pub(crate) fn error_response(
    status: StatusCode,
    kind: &str,
    msg: impl std::fmt::Display,
) -> Response {
    let body = serde_json::json!({ "error": kind, "msg": msg.to_string() });
    (status, Json(body)).into_response()
}

pub(crate) fn registry_error_response(err: &RegistryError) -> Response {
    match err {
        RegistryError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "not_found", err),
        RegistryError::Forbidden(_) => error_response(StatusCode::FORBIDDEN, "forbidden", err),
        RegistryError::LockPoisoned => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal", err)
        }
    }
}

pub(crate) fn store_error_response(err: &StoreError) -> Response {
    match err {
        StoreError::BucketNotFound(_) | StoreError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "not_found", err)
        }
        StoreError::EmptyPath => error_response(StatusCode::BAD_REQUEST, "bad_request", err),
        StoreError::InvalidPayload(_) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid_payload", err)
        }
        StoreError::LockPoisoned => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal", err)
        }
        StoreError::Registry(inner) => registry_error_response(inner),
    }
}
