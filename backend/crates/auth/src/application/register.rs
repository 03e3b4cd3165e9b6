//! Register Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use platform::password::PasswordService;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let display_name = DisplayName::new(&input.display_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::for_registration(input.password)?;

        // Fast path only; `create` is the authoritative uniqueness check
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        // Argon2 is CPU and memory bound; keep it off the async workers
        let passwords = self.passwords.clone();
        let hashed = tokio::task::spawn_blocking(move || passwords.hash(raw_password.inner()))
            .await??;

        let user = User::new(display_name, email);
        let credential = Credential::new(user.user_id, UserPassword::from_hashed(hashed));

        self.user_repo.create(&user, &credential).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
        })
    }
}
