//! Add Comment Use Case

use std::sync::Arc;

use auth::{AuthenticatedUser, UserRepository};
use kernel::id::PostId;

use crate::application::views::{AuthorDirectory, CommentView};
use crate::domain::entities::Comment;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::CommentText;
use crate::error::{FeedError, FeedResult};

pub struct AddCommentUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> AddCommentUseCase<P, U>
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

    /// Append a comment and return the post's full comment list, oldest first
    pub async fn execute(
        &self,
        user: &AuthenticatedUser,
        post_id: &PostId,
        text: &str,
    ) -> FeedResult<Vec<CommentView>> {
        let text = CommentText::new(text)?;
        let comment = Comment::new(*user.user_id(), text);

        let comments = self
            .post_repo
            .append_comment(post_id, &comment)
            .await?
            .ok_or(FeedError::PostNotFound)?;

        tracing::info!(
            post_id = %post_id,
            comment_id = %comment.comment_id,
            user_id = %user.user_id(),
            "Comment added"
        );

        let ids = comments.iter().map(|c| c.author_id).collect();
        // The comment is stored; nothing past this point may fail the call
        let directory = AuthorDirectory::load_or_unknown(self.user_repo.as_ref(), ids).await;

        Ok(directory.comments(&comments))
    }
}
