//! Feed Entities
//!
//! A `Post` owns its likes and its comments. Both only change through
//! [`Post::toggle_like`] and [`Post::append_comment`], which the post store
//! applies under its per-post atomicity guarantee.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::value_objects::{Category, CommentText, PostBody, PostTitle};

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub like_count: usize,
    pub is_liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub author_id: UserId,
    pub text: CommentText,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: UserId, text: CommentText) -> Self {
        Self {
            comment_id: CommentId::new(),
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub author_id: UserId,
    pub title: PostTitle,
    pub body: PostBody,
    pub category: Category,
    /// Users who currently like the post (a set: at most once each)
    pub liked_by: BTreeSet<UserId>,
    /// Append-only, in insertion order
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with no likes and no comments
    pub fn new(author_id: UserId, title: PostTitle, body: PostBody, category: Category) -> Self {
        Self {
            post_id: PostId::new(),
            author_id,
            title,
            body,
            category,
            liked_by: BTreeSet::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Unlike if `user_id` already likes the post, like otherwise
    pub fn toggle_like(&mut self, user_id: UserId) -> LikeState {
        let is_liked = if self.liked_by.remove(&user_id) {
            false
        } else {
            self.liked_by.insert(user_id);
            true
        };

        LikeState {
            like_count: self.liked_by.len(),
            is_liked,
        }
    }

    pub fn append_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.liked_by.contains(user_id)
    }
}
