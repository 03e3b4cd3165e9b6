//! Authenticate Use Case
//!
//! Verifies email + password and issues a session token.

use std::sync::Arc;

use platform::password::PasswordService;

use crate::application::session_token::{IssuedToken, SessionTokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug)]
pub struct AuthenticateOutput {
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub token: IssuedToken,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    tokens: SessionTokenService,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService, tokens: SessionTokenService) -> Self {
        Self {
            user_repo,
            passwords,
            tokens,
        }
    }

    /// Unknown email and wrong password fail identically, after the same
    /// amount of hashing work.
    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<AuthenticateOutput> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let found = self.user_repo.find_credential_by_email(&email).await?;

        let passwords = self.passwords.clone();
        let (user, password_valid) = tokio::task::spawn_blocking(move || match found {
            Some((user, credential)) => {
                let valid = passwords.verify(
                    raw_password.inner(),
                    credential.password_hash.as_hashed(),
                );
                if valid && passwords.needs_rehash(credential.password_hash.as_hashed()) {
                    tracing::debug!(user_id = %user.user_id, "Stored password hash uses an outdated cost");
                }
                (Some(user), valid)
            }
            None => (None, passwords.verify_dummy(raw_password.inner())),
        })
        .await?;

        let user = match (user, password_valid) {
            (Some(user), true) => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = self.tokens.issue(&user.user_id);

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(AuthenticateOutput {
            user_id: user.user_id,
            display_name: user.display_name,
            token,
        })
    }
}
