//! Feed (Posts and Engagement) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post and comment entities, value objects, post store trait
//! - `application/` - Engagement use cases and read models
//! - `infra/` - PostgreSQL and in-memory post stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Creating posts, toggling likes and commenting require an
//! [`auth::AuthenticatedUser`]; listing posts is public.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::PostRepository;
pub use error::{FeedError, FeedResult};
pub use infra::{InMemoryPostRepository, PgPostRepository};
pub use presentation::{FeedAppState, feed_router};

#[cfg(test)]
mod tests;
