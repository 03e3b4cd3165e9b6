//! Create Post Use Case

use std::sync::Arc;

use auth::AuthenticatedUser;

use crate::application::views::{AuthorView, PostView};
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Category, PostBody, PostTitle};
use crate::error::FeedResult;

pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub category: String,
}

pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(
        &self,
        author: &AuthenticatedUser,
        input: CreatePostInput,
    ) -> FeedResult<PostView> {
        let title = PostTitle::new(&input.title)?;
        let body = PostBody::new(&input.body)?;
        let category: Category = input.category.parse()?;

        let post = Post::new(*author.user_id(), title, body, category);
        self.post_repo.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            author_id = %post.author_id,
            category = %post.category,
            "Post created"
        );

        Ok(PostView {
            post_id: post.post_id,
            title: post.title.to_string(),
            body: post.body.to_string(),
            category: post.category,
            author: AuthorView {
                user_id: post.author_id,
                display_name: author.display_name().to_string(),
            },
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: post.created_at,
        })
    }
}
