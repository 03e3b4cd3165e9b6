//! Repository Traits
//!
//! The post store exposes atomic single-post primitives instead of a
//! generic load/save pair, so a like or comment can never be applied to a
//! stale copy of a post.

use crate::domain::entities::{Comment, LikeState, Post};
use crate::error::FeedResult;
use kernel::id::{PostId, UserId};

/// Post store
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new post
    async fn create(&self, post: &Post) -> FeedResult<()>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>>;

    /// All posts, newest first
    async fn list_recent(&self) -> FeedResult<Vec<Post>>;

    /// Atomically toggle `user_id` in the post's likes
    ///
    /// Returns `None` if the post does not exist.
    async fn toggle_like(&self, post_id: &PostId, user_id: &UserId)
    -> FeedResult<Option<LikeState>>;

    /// Atomically append a comment and return the full comment list
    ///
    /// Returns `None` if the post does not exist.
    async fn append_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> FeedResult<Option<Vec<Comment>>>;
}
