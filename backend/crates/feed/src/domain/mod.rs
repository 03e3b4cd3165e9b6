//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{Comment, LikeState, Post};
pub use repository::PostRepository;
pub use value_objects::{Category, CommentText, PostBody, PostTitle};
