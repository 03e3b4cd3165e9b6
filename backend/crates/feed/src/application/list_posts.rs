//! List Posts Use Case
//!
//! The only feed operation that does not require authentication.

use std::sync::Arc;

use auth::UserRepository;

use crate::application::views::{AuthorDirectory, PostView};
use crate::domain::repository::PostRepository;
use crate::error::FeedResult;

pub struct ListPostsUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> ListPostsUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            post_repo,
            user_repo,
        }
    }

    /// All posts, newest first
    pub async fn execute(&self) -> FeedResult<Vec<PostView>> {
        let posts = self.post_repo.list_recent().await?;

        let ids = AuthorDirectory::for_posts(&posts);
        let directory = AuthorDirectory::load(self.user_repo.as_ref(), ids).await?;

        Ok(posts.iter().map(|post| directory.post(post)).collect())
    }
}
