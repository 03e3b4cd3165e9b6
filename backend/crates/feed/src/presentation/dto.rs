//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{AuthorView, CommentView, PostView};
use crate::domain::entities::LikeState;
use crate::domain::value_objects::Category;

// ============================================================================
// Requests
// ============================================================================

/// Create post request
///
/// The body of a post is called `description` on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Add comment request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddCommentRequest {
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub full_name: String,
}

impl From<AuthorView> for AuthorResponse {
    fn from(author: AuthorView) -> Self {
        Self {
            id: author.user_id.to_string(),
            full_name: author.display_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub user: AuthorResponse,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(comment: CommentView) -> Self {
        Self {
            id: comment.comment_id.to_string(),
            user: comment.author.into(),
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub author: AuthorResponse,
    /// Ids of the users who like the post
    pub likes: Vec<String>,
    pub like_count: usize,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<PostView> for PostResponse {
    fn from(post: PostView) -> Self {
        Self {
            id: post.post_id.to_string(),
            title: post.title,
            description: post.body,
            category: post.category,
            author: post.author.into(),
            like_count: post.liked_by.len(),
            likes: post.liked_by.iter().map(ToString::to_string).collect(),
            comments: post.comments.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Number of likes after the toggle
    pub likes: usize,
    pub is_liked: bool,
}

impl From<LikeState> for LikeResponse {
    fn from(state: LikeState) -> Self {
        Self {
            likes: state.like_count,
            is_liked: state.is_liked,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}
