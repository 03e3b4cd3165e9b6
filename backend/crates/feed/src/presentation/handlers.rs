//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use auth::{AuthenticatedUser, UserRepository};
use kernel::id::PostId;

use crate::application::{
    AddCommentUseCase, CreatePostInput, CreatePostUseCase, ListPostsUseCase, ToggleLikeUseCase,
};
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};
use crate::presentation::dto::{
    AddCommentRequest, CommentsResponse, CreatePostRequest, LikeResponse, PostResponse,
};

/// Shared state for feed handlers
pub struct FeedAppState<P, U>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub users: Arc<U>,
}

impl<P, U> Clone for FeedAppState<P, U>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            users: self.users.clone(),
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> FeedResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| FeedError::Validation(e.body_text()))
}

/// Malformed ids cannot name an existing post
fn parse_post_id(raw: &str) -> FeedResult<PostId> {
    raw.parse().map_err(|_| FeedError::PostNotFound)
}

/// GET /posts
pub async fn list_posts<P, U>(
    State(state): State<FeedAppState<P, U>>,
) -> FeedResult<Json<Vec<PostResponse>>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let posts = ListPostsUseCase::new(state.posts.clone(), state.users.clone())
        .execute()
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// POST /posts
pub async fn create_post<P, U>(
    State(state): State<FeedAppState<P, U>>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> FeedResult<(StatusCode, Json<PostResponse>)>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let post = CreatePostUseCase::new(state.posts.clone())
        .execute(
            &user,
            CreatePostInput {
                title: req.title,
                body: req.description,
                category: req.category,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// POST /posts/{id}/like
pub async fn toggle_like<P, U>(
    State(state): State<FeedAppState<P, U>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> FeedResult<Json<LikeResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;

    let state = ToggleLikeUseCase::new(state.posts.clone())
        .execute(&user, &post_id)
        .await?;

    Ok(Json(state.into()))
}

/// POST /posts/{id}/comment
pub async fn add_comment<P, U>(
    State(state): State<FeedAppState<P, U>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    payload: Result<Json<AddCommentRequest>, JsonRejection>,
) -> FeedResult<Json<CommentsResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;
    let req = json_body(payload)?;

    let comments = AddCommentUseCase::new(state.posts.clone(), state.users.clone())
        .execute(&user, &post_id, &req.text)
        .await?;

    Ok(Json(CommentsResponse {
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}
