use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    /// A structured error body from the daemon.
    #[error("server returned {status}: {kind}: {msg}")]
    Api {
        status: StatusCode,
        kind: String,
        msg: String,
    },
    /// A non-success status whose body was not the daemon's error shape.
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}

/// The daemon's uniform error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    msg: String,
}

impl ApiError {
    pub(crate) fn from_response_body(status: StatusCode, body: String) -> Self {
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => ApiError::Api {
                status,
                kind: parsed.error,
                msg: parsed.msg,
            },
            Err(_) => ApiError::HttpStatus(status, body),
        }
    }

    /// The machine-readable error kind, when the server sent one. Callers
    /// dispatch on this, never on the message text.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ApiError::Api { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
