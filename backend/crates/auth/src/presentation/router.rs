//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router (`POST /signup`, `POST /login`)
pub fn auth_router<U>(state: AuthAppState<U>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<U>))
        .route("/login", post(handlers::login::<U>))
        .with_state(state)
}
