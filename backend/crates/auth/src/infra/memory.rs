//! In-Memory Repository Implementation
//!
//! Used when no database is configured and by tests. State is lost on
//! restart.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, (User, Credential)>,
    by_email: HashMap<Email, UserId>,
}

/// In-memory credential store
#[derive(Default)]
pub struct InMemoryUserRepository {
    tables: RwLock<Tables>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        // Check and insert under one write guard
        let mut tables = self.tables.write().await;

        if tables.by_email.contains_key(&user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        tables.by_email.insert(user.email.clone(), user.user_id);
        tables
            .users
            .insert(user.user_id, (user.clone(), credential.clone()));

        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.tables.read().await.by_email.contains_key(email))
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, Credential)>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(user_id).map(|(user, _)| user.clone()))
    }

    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> AuthResult<HashMap<UserId, DisplayName>> {
        let tables = self.tables.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| {
                tables
                    .users
                    .get(id)
                    .map(|(user, _)| (*id, user.display_name.clone()))
            })
            .collect())
    }
}
