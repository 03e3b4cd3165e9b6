//! Credential Entity
//!
//! Password digest bound to a user. Only the credential store and the
//! login use case ever see it.

use crate::domain::value_object::{user_id::UserId, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: UserPassword,
}

impl Credential {
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            password_hash,
        }
    }
}
