//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::collections::HashMap;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user together with their credential
    ///
    /// Email uniqueness is enforced atomically with the insert: of two
    /// concurrent calls with the same email exactly one succeeds and the
    /// other fails with `AuthError::DuplicateEmail`.
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Find the user and credential registered under an email
    async fn find_credential_by_email(&self, email: &Email)
    -> AuthResult<Option<(User, Credential)>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Resolve display names for a batch of users
    ///
    /// Unknown identifiers are absent from the result.
    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> AuthResult<HashMap<UserId, DisplayName>>;
}
