//! Toggle Like Use Case

use std::sync::Arc;

use auth::AuthenticatedUser;
use kernel::id::PostId;

use crate::domain::entities::LikeState;
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};

pub struct ToggleLikeUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ToggleLikeUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Like the post if the caller does not like it yet, unlike it otherwise
    pub async fn execute(&self, user: &AuthenticatedUser, post_id: &PostId) -> FeedResult<LikeState> {
        let state = self
            .post_repo
            .toggle_like(post_id, user.user_id())
            .await?
            .ok_or(FeedError::PostNotFound)?;

        tracing::debug!(
            post_id = %post_id,
            user_id = %user.user_id(),
            is_liked = state.is_liked,
            like_count = state.like_count,
            "Like toggled"
        );

        Ok(state)
    }
}
