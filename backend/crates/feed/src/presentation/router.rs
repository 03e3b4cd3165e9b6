//! Feed Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use auth::{AccessGuard, UserRepository, require_bearer_auth};

use crate::domain::repository::PostRepository;
use crate::presentation::handlers::{self, FeedAppState};

/// Create the Feed router
///
/// `GET /posts` is public. Every other route is behind the bearer guard,
/// which runs before the handler reads the path or the body.
pub fn feed_router<P, U>(state: FeedAppState<P, U>, guard: AccessGuard<U>) -> Router
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/posts", post(handlers::create_post::<P, U>))
        .route("/posts/{id}/like", post(handlers::toggle_like::<P, U>))
        .route("/posts/{id}/comment", post(handlers::add_comment::<P, U>))
        .route_layer(middleware::from_fn_with_state(
            guard,
            require_bearer_auth::<U>,
        ));

    let public = Router::new().route("/posts", get(handlers::list_posts::<P, U>));

    public.merge(protected).with_state(state)
}
