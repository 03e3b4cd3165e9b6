//! Scenario tests for the feed crate
//!
//! Users are registered and authenticated through the auth crate, so every
//! `AuthenticatedUser` here comes from the real access guard.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::application::{
        AuthenticateInput, AuthenticateUseCase, RegisterInput, RegisterUseCase,
    };
    use auth::domain::entity::{credential::Credential, user::User};
    use auth::domain::value_object::{display_name::DisplayName, email::Email};
    use auth::{
        AuthAppState, AuthConfig, AuthError, AuthResult, AuthenticatedUser,
        InMemoryUserRepository, UserRepository,
    };
    use kernel::id::UserId;
    use std::collections::HashMap;

    use crate::infra::InMemoryPostRepository;
    use crate::presentation::FeedAppState;

    pub struct World {
        pub auth: AuthAppState<InMemoryUserRepository>,
        pub feed: FeedAppState<InMemoryPostRepository, InMemoryUserRepository>,
    }

    pub fn world() -> World {
        let users = Arc::new(InMemoryUserRepository::new());
        let auth = AuthAppState::new(users.clone(), AuthConfig::development()).unwrap();
        let feed = FeedAppState {
            posts: Arc::new(InMemoryPostRepository::new()),
            users,
        };
        World { auth, feed }
    }

    impl World {
        /// Register and log in, returning the bearer token
        pub async fn sign_up(&self, name: &str, email: &str) -> String {
            RegisterUseCase::new(self.auth.repo.clone(), self.auth.passwords.clone())
                .execute(RegisterInput {
                    display_name: name.to_string(),
                    email: email.to_string(),
                    password: "secret1".to_string(),
                })
                .await
                .unwrap();

            AuthenticateUseCase::new(
                self.auth.repo.clone(),
                self.auth.passwords.clone(),
                self.auth.tokens.clone(),
            )
            .execute(AuthenticateInput {
                email: email.to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap()
            .token
            .token
        }

        pub async fn user(&self, name: &str, email: &str) -> AuthenticatedUser {
            let token = self.sign_up(name, email).await;
            self.auth
                .access_guard()
                .authorize(Some(&token))
                .await
                .unwrap()
        }
    }

    /// User store whose batch name lookup always fails
    pub struct NamesUnavailable(pub Arc<InMemoryUserRepository>);

    impl UserRepository for NamesUnavailable {
        async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
            self.0.create(user, credential).await
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            self.0.exists_by_email(email).await
        }

        async fn find_credential_by_email(
            &self,
            email: &Email,
        ) -> AuthResult<Option<(User, Credential)>> {
            self.0.find_credential_by_email(email).await
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            self.0.find_by_id(user_id).await
        }

        async fn find_display_names(
            &self,
            _user_ids: &[UserId],
        ) -> AuthResult<HashMap<UserId, DisplayName>> {
            Err(AuthError::Internal("user store unavailable".into()))
        }
    }
}

#[cfg(test)]
mod engine_tests {
    use super::support::*;
    use crate::application::{
        AddCommentUseCase, CreatePostInput, CreatePostUseCase, ListPostsUseCase, ToggleLikeUseCase,
    };
    use crate::application::views::UNKNOWN_AUTHOR;
    use crate::domain::entities::LikeState;
    use crate::domain::repository::PostRepository;
    use crate::domain::value_objects::Category;
    use crate::error::FeedError;
    use kernel::id::PostId;
    use std::sync::Arc;

    fn input(title: &str, body: &str, category: &str) -> CreatePostInput {
        CreatePostInput {
            title: title.to_string(),
            body: body.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_storm_scenario() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;

        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("Storm hits town", "Heavy rain overnight", "news"))
            .await
            .unwrap();
        assert_eq!(post.category, Category::News);
        assert_eq!(post.author.display_name, "Ann");
        assert!(post.liked_by.is_empty());
        assert!(post.comments.is_empty());

        let likes = ToggleLikeUseCase::new(world.feed.posts.clone());
        assert_eq!(
            likes.execute(&ann, &post.post_id).await.unwrap(),
            LikeState { like_count: 1, is_liked: true }
        );
        assert_eq!(
            likes.execute(&ann, &post.post_id).await.unwrap(),
            LikeState { like_count: 0, is_liked: false }
        );

        let comments = AddCommentUseCase::new(world.feed.posts.clone(), world.feed.users.clone())
            .execute(&ann, &post.post_id, "Stay safe")
            .await
            .unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "Stay safe");
        assert_eq!(comments[0].author.display_name, "Ann");
    }

    #[tokio::test]
    async fn test_error_scenario() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;

        let err = ToggleLikeUseCase::new(world.feed.posts.clone())
            .execute(&ann, &PostId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::PostNotFound));

        let err = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("", "Heavy rain overnight", "news"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Validation(_)));

        let err = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("Title", "Body", "sports"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Validation(_)));
    }

    #[tokio::test]
    async fn test_comment_validation_and_missing_post() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("Title", "Body", "music"))
            .await
            .unwrap();

        let comments = AddCommentUseCase::new(world.feed.posts.clone(), world.feed.users.clone());

        let err = comments
            .execute(&ann, &post.post_id, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Validation(_)));

        let err = comments
            .execute(&ann, &PostId::new(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::PostNotFound));

        // Failed calls left the post untouched
        let listed = ListPostsUseCase::new(world.feed.posts.clone(), world.feed.users.clone())
            .execute()
            .await
            .unwrap();
        assert!(listed[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_comments_grow_by_one_and_keep_order() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let bob = world.user("Bob", "bob@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("Title", "Body", "culture"))
            .await
            .unwrap();

        let use_case = AddCommentUseCase::new(world.feed.posts.clone(), world.feed.users.clone());
        let mut previous = Vec::new();
        for (i, who) in [&ann, &bob, &ann, &bob].into_iter().enumerate() {
            let comments = use_case
                .execute(who, &post.post_id, &format!("comment {i}"))
                .await
                .unwrap();

            assert_eq!(comments.len(), previous.len() + 1);
            assert_eq!(&comments[..previous.len()], &previous[..]);
            previous = comments;
        }

        let names: Vec<_> = previous
            .iter()
            .map(|c| c.author.display_name.as_str())
            .collect();
        assert_eq!(names, ["Ann", "Bob", "Ann", "Bob"]);
    }

    #[tokio::test]
    async fn test_comment_is_reported_saved_when_name_lookup_fails() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(&ann, input("Storm hits town", "Heavy rain overnight", "news"))
            .await
            .unwrap();

        let users = Arc::new(NamesUnavailable(world.feed.users.clone()));
        let comments = AddCommentUseCase::new(world.feed.posts.clone(), users)
            .execute(&ann, &post.post_id, "Stay safe")
            .await
            .unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "Stay safe");
        assert_eq!(comments[0].author.user_id, *ann.user_id());
        assert_eq!(comments[0].author.display_name, UNKNOWN_AUTHOR);

        let stored = world
            .feed
            .posts
            .find_by_id(&post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_list_posts_newest_first_with_names() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let bob = world.user("Bob", "bob@x.com").await;

        let create = CreatePostUseCase::new(world.feed.posts.clone());
        let first = create
            .execute(&ann, input("First", "Body", "news"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = create
            .execute(&bob, input("Second", "Body", "business"))
            .await
            .unwrap();

        AddCommentUseCase::new(world.feed.posts.clone(), world.feed.users.clone())
            .execute(&bob, &first.post_id, "Nice one")
            .await
            .unwrap();

        let posts = ListPostsUseCase::new(world.feed.posts.clone(), world.feed.users.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post_id, second.post_id);
        assert_eq!(posts[0].author.display_name, "Bob");
        assert_eq!(posts[1].post_id, first.post_id);
        assert_eq!(posts[1].comments[0].author.display_name, "Bob");
    }

    #[tokio::test]
    async fn test_list_posts_empty() {
        let world = world();
        let posts = ListPostsUseCase::new(world.feed.posts.clone(), world.feed.users.clone())
            .execute()
            .await
            .unwrap();
        assert!(posts.is_empty());
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::support::*;
    use crate::application::{
        AddCommentUseCase, CreatePostInput, CreatePostUseCase, ToggleLikeUseCase,
    };
    use crate::domain::repository::PostRepository;
    use std::sync::Arc;

    const USERS: usize = 24;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_likes_from_distinct_users() {
        let world = world();
        let author = world.user("Author", "author@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(
                &author,
                CreatePostInput {
                    title: "Busy post".into(),
                    body: "Everyone likes this".into(),
                    category: "news".into(),
                },
            )
            .await
            .unwrap();

        let mut users = Vec::with_capacity(USERS);
        for i in 0..USERS {
            users.push(world.user(&format!("User {i}"), &format!("u{i}@x.com")).await);
        }

        let use_case = Arc::new(ToggleLikeUseCase::new(world.feed.posts.clone()));
        let handles: Vec<_> = users
            .into_iter()
            .map(|user| {
                let use_case = use_case.clone();
                let post_id = post.post_id;
                tokio::spawn(async move { use_case.execute(&user, &post_id).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_liked);
        }

        let stored = world
            .feed
            .posts
            .find_by_id(&post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.like_count(), USERS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_same_user_racing_toggles_stays_consistent() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(
                &ann,
                CreatePostInput {
                    title: "Race".into(),
                    body: "Toggle me".into(),
                    category: "music".into(),
                },
            )
            .await
            .unwrap();

        let use_case = Arc::new(ToggleLikeUseCase::new(world.feed.posts.clone()));
        let handles: Vec<_> = (0..9)
            .map(|_| {
                let use_case = use_case.clone();
                let ann = ann.clone();
                let post_id = post.post_id;
                tokio::spawn(async move { use_case.execute(&ann, &post_id).await })
            })
            .collect();

        for handle in handles {
            let state = handle.await.unwrap().unwrap();
            assert!(state.like_count <= 1);
        }

        // Odd number of toggles: liked exactly once
        let stored = world
            .feed
            .posts
            .find_by_id(&post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.like_count(), 1);
        assert!(stored.is_liked_by(ann.user_id()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_comments_are_all_kept() {
        let world = world();
        let ann = world.user("Ann", "ann@x.com").await;
        let post = CreatePostUseCase::new(world.feed.posts.clone())
            .execute(
                &ann,
                CreatePostInput {
                    title: "Thread".into(),
                    body: "Discuss".into(),
                    category: "culture".into(),
                },
            )
            .await
            .unwrap();

        let use_case = Arc::new(AddCommentUseCase::new(
            world.feed.posts.clone(),
            world.feed.users.clone(),
        ));
        let handles: Vec<_> = (0..USERS)
            .map(|i| {
                let use_case = use_case.clone();
                let ann = ann.clone();
                let post_id = post.post_id;
                tokio::spawn(async move {
                    use_case
                        .execute(&ann, &post_id, &format!("comment {i}"))
                        .await
                })
            })
            .collect();

        let mut lengths = Vec::new();
        for handle in handles {
            lengths.push(handle.await.unwrap().unwrap().len());
        }
        lengths.sort_unstable();
        assert_eq!(lengths, (1..=USERS).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod http_tests {
    use super::support::*;
    use crate::presentation::feed_router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(world: &World) -> axum::Router {
        feed_router(world.feed.clone(), world.auth.access_guard())
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
    async fn test_full_flow_over_http() {
        let world = world();
        let token = world.sign_up("Ann", "ann@x.com").await;
        let app = app(&world);

        let response = app
            .clone()
            .oneshot(post_json(
                "/posts",
                Some(&token),
                json!({"title": "Storm hits town", "description": "Heavy rain overnight", "category": "news"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let post = body_json(response).await;
        assert_eq!(post["author"]["fullName"], "Ann");
        assert_eq!(post["likeCount"], 0);
        let id = post["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(&format!("/posts/{id}/like"), Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"likes": 1, "isLiked": true}));

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/posts/{id}/comment"),
                Some(&token),
                json!({"text": "Stay safe"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let comments = body_json(response).await;
        assert_eq!(comments["comments"][0]["text"], "Stay safe");
        assert_eq!(comments["comments"][0]["user"]["fullName"], "Ann");

        let response = app
            .oneshot(Request::get("/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let posts = body_json(response).await;
        assert_eq!(posts[0]["id"], id.as_str());
        assert_eq!(posts[0]["likes"].as_array().unwrap().len(), 1);
        assert_eq!(posts[0]["comments"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_require_token() {
        let world = world();
        let app = app(&world);

        let requests = [
            post_json("/posts", None, json!({"title": "t", "description": "d", "category": "news"})),
            post_json(&format!("/posts/{}/like", kernel::id::PostId::new()), None, json!({})),
            post_json(
                &format!("/posts/{}/comment", kernel::id::PostId::new()),
                Some("forged.token"),
                json!({"text": "hi"}),
            ),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
        }

        let response = app
            .oneshot(Request::get("/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_validation_and_not_found_mapping() {
        let world = world();
        let token = world.sign_up("Ann", "ann@x.com").await;
        let app = app(&world);

        let response = app
            .clone()
            .oneshot(post_json(
                "/posts",
                Some(&token),
                json!({"title": "", "description": "d", "category": "news"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let response = app
            .clone()
            .oneshot(post_json("/posts/not-a-uuid/like", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");

        let response = app
            .oneshot(post_json(
                &format!("/posts/{}/like", kernel::id::PostId::new()),
                Some(&token),
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
