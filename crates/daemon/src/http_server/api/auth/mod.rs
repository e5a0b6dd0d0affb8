use axum::routing::post;
use axum::Router;

use crate::ServiceState;

pub mod login;
pub mod register;

// Re-export for convenience
pub use login::LoginRequest;
pub use register::RegisterRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register::handler))
        .route("/login", post(login::handler))
        .with_state(state)
}
