use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use http::request::Parts;
use uuid::Uuid;

use crate::ServiceState;

/// The authenticated caller, resolved from the bearer token before the
/// handler runs.
///
/// A missing Authorization header is 401. A present but malformed, expired,
/// or badly-signed token is 403.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub Uuid);

#[async_trait]
impl FromRequestParts<ServiceState> for AuthPrincipal {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let header =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;
        let bearer = match header {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(rejection) if rejection.is_missing() => return Err(AuthRejection::MissingToken),
            Err(_) => {
                return Err(AuthRejection::InvalidToken(
                    "malformed authorization header".to_string(),
                ))
            }
        };

        match state.auth().authenticate(bearer.token()) {
            Ok(principal_id) => Ok(AuthPrincipal(principal_id)),
            Err(e) => Err(AuthRejection::InvalidToken(e.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AuthRejection::MissingToken => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AuthRejection::InvalidToken(_) => (StatusCode::FORBIDDEN, "forbidden"),
        };
        let body = serde_json::json!({ "error": kind, "msg": self.to_string() });
        (status, Json(body)).into_response()
    }
}
