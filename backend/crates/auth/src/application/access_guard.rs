//! Access Guard
//!
//! Turns a bearer credential into an [`AuthenticatedUser`]. Every
//! state-changing feed operation takes an `&AuthenticatedUser`, and the
//! only way to obtain one outside this crate is through [`AccessGuard`].

use std::sync::Arc;

use crate::application::session_token::{SessionTokenService, TokenError};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Caller identity established by the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    display_name: DisplayName,
}

impl AuthenticatedUser {
    pub(crate) fn new(user_id: UserId, display_name: DisplayName) -> Self {
        Self {
            user_id,
            display_name,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}

/// Bearer token guard
pub struct AccessGuard<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: SessionTokenService,
}

impl<U> Clone for AccessGuard<U>
where
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<U> AccessGuard<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: SessionTokenService) -> Self {
        Self { user_repo, tokens }
    }

    /// Authorize a request from its bearer token (already stripped of the scheme)
    ///
    /// A token whose subject no longer resolves to a user is rejected.
    pub async fn authorize(&self, bearer: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = bearer.ok_or(AuthError::Unauthorized("Missing bearer token"))?;

        let user_id = self.tokens.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::Unauthorized("Session token expired"),
            TokenError::Invalid => AuthError::Unauthorized("Invalid session token"),
        })?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::Unauthorized("Invalid session token"))?;

        Ok(AuthenticatedUser::new(user.user_id, user.display_name))
    }
}
