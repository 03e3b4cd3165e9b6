//! User Entity
//!
//! Public account data. The password digest lives in [`Credential`]
//! and never travels with this type.
//!
//! [`Credential`]: super::credential::Credential

use chrono::{DateTime, Utc};

use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Immutable identifier
    pub user_id: UserId,
    /// Name shown next to posts and comments
    pub display_name: DisplayName,
    /// Login key (lower-cased, unique)
    pub email: Email,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(display_name: DisplayName, email: Email) -> Self {
        Self {
            user_id: UserId::new(),
            display_name,
            email,
            created_at: Utc::now(),
        }
    }
}
