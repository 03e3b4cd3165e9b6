//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::AccessGuard;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware that requires a valid session token
///
/// On success the [`AuthenticatedUser`](crate::application::AuthenticatedUser)
/// is stored in the request extensions for handlers to extract with
/// `Extension<AuthenticatedUser>`. Install it with `route_layer` so that it
/// runs before the body is read.
pub async fn require_bearer_auth<U>(
    State(guard): State<AccessGuard<U>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers()).map(str::to_owned);
    let user = guard.authorize(token.as_deref()).await?;

    tracing::debug!(user_id = %user.user_id(), "Request authenticated");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
