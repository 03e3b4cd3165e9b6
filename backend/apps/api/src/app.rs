//! Router Composition

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};

use auth::{AuthAppState, AuthConfig, UserRepository, auth_router};
use feed::{FeedAppState, PostRepository, feed_router};

/// Assemble every route over the given stores
pub fn build_router<U, P>(users: Arc<U>, posts: Arc<P>, auth_config: AuthConfig) -> anyhow::Result<Router>
where
    U: UserRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(users.clone(), auth_config)
        .context("Invalid password hashing configuration")?;
    let guard = auth_state.access_guard();
    let feed_state = FeedAppState { posts, users };

    Ok(Router::new()
        .route("/health", get(health))
        .merge(auth_router(auth_state))
        .merge(feed_router(feed_state, guard)))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryUserRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use feed::InMemoryPostRepository;
    use platform::password::PasswordHashCost;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            AuthConfig::development(),
        )
        .unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[test]
    fn test_invalid_hash_cost_is_rejected() {
        let config = AuthConfig {
            password_cost: PasswordHashCost {
                memory_kib: 0,
                iterations: 0,
                parallelism: 0,
            },
            ..AuthConfig::development()
        };

        let result = build_router(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            config,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_signup_login_post_and_list() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/signup",
                None,
                json!({"fullName": "Ann Lee", "email": "Ann@X.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let user_id = body_json(response).await["userId"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                None,
                json!({"email": "ann@x.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login = body_json(response).await;
        assert_eq!(login["userId"], user_id.as_str());
        let token = login["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/posts",
                Some(&token),
                json!({"title": "Market day", "description": "Stalls open at nine", "category": "business"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::get("/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let posts = body_json(response).await;
        assert_eq!(posts.as_array().unwrap().len(), 1);
        assert_eq!(posts[0]["author"]["id"], user_id.as_str());
        assert_eq!(posts[0]["author"]["fullName"], "Ann Lee");
        assert_eq!(posts[0]["category"], "business");
    }
}
