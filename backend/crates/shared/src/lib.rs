//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary shared by
//! the auth and feed crates:
//! - Unified error type and its HTTP classification
//! - Typed identifiers for users, posts and comments
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod code;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}
pub mod id;
