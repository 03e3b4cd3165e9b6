//! User Password Value Object
//!
//! Domain wrappers around `platform::password`. `RawPassword` is the
//! validated user input (zeroized on drop); `UserPassword` is the stored
//! Argon2id digest.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Minimum password length accepted at registration
pub const REGISTRATION_MIN_LENGTH: usize = 6;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password presented at login
    ///
    /// Only the hashing service's input policy applies, so an account
    /// created under an older minimum can still sign in.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(policy_error)?;
        Ok(Self(clear_text))
    }

    /// Validate a password chosen at registration
    pub fn for_registration(raw: String) -> AppResult<Self> {
        let password = Self::new(raw)?;

        let len = password.0.char_count();
        if len < REGISTRATION_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                REGISTRATION_MIN_LENGTH, len
            ))
            .with_action("Please choose a longer password"));
        }

        Ok(password)
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(err: PasswordPolicyError) -> AppError {
    match err {
        PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
            "Password must be at most {} characters (got {})",
            max, actual
        ))
        .with_action("Please choose a shorter password"),

        PasswordPolicyError::EmptyOrWhitespace => {
            AppError::bad_request("Password is required").with_action("Please enter a password")
        }

        PasswordPolicyError::InvalidCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any special control characters")
        }
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed)
    }

    /// Load a stored digest, rejecting anything that is not a PHC string
    pub fn from_db(phc: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AppError::internal(format!("Stored password hash is unreadable: {e}")))
    }

    pub fn as_hashed(&self) -> &HashedPassword {
        &self.0
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[REDACTED]").finish()
    }
}
