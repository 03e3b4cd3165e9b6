//! Application Layer
//!
//! Use cases of the engagement engine and the read models they return.

pub mod add_comment;
pub mod create_post;
pub mod list_posts;
pub mod toggle_like;
pub mod views;

// Re-exports
pub use add_comment::AddCommentUseCase;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use list_posts::ListPostsUseCase;
pub use toggle_like::ToggleLikeUseCase;
pub use views::{AuthorView, CommentView, PostView};
