//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        // `users_email_key` makes the insert itself the uniqueness check
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                display_name,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.display_name.as_str())
        .bind(user.email.as_str())
        .bind(credential.password_hash.as_phc_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, Credential)>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                display_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user_with_credential()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                display_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_display_names(
        &self,
        user_ids: &[UserId],
    ) -> AuthResult<HashMap<UserId, DisplayName>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = user_ids.iter().map(|id| id.into_uuid()).collect();
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT user_id, display_name FROM users WHERE user_id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| (UserId::from_uuid(id), DisplayName::from_db(name)))
            .collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    display_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            display_name: DisplayName::from_db(self.display_name),
            email: Email::from_db(self.email),
            created_at: self.created_at,
        }
    }

    fn into_user_with_credential(mut self) -> AuthResult<(User, Credential)> {
        let password_hash = UserPassword::from_db(std::mem::take(&mut self.password_hash))?;
        let user = self.into_user();
        let credential = Credential::new(user.user_id, password_hash);
        Ok((user, credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{ClearTextPassword, PasswordHashCost, PasswordService};

    fn password() -> UserPassword {
        let hashed = PasswordService::new(PasswordHashCost::minimal(), None)
            .unwrap()
            .hash(&ClearTextPassword::new("secret1".to_string()).unwrap())
            .unwrap();
        UserPassword::from_hashed(hashed)
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_and_find(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let user = User::new(
            DisplayName::new("Ann").unwrap(),
            Email::new("ann@example.com").unwrap(),
        );
        repo.create(&user, &Credential::new(user.user_id, password()))
            .await
            .unwrap();

        let (found, credential) = repo
            .find_credential_by_email(&user.email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
        assert_eq!(credential.user_id, user.user_id);

        let names = repo.find_display_names(&[user.user_id]).await.unwrap();
        assert_eq!(names[&user.user_id].as_str(), "Ann");
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_registration_admits_one(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let password = password();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            let password = password.clone();
            handles.push(tokio::spawn(async move {
                let user = User::new(
                    DisplayName::new("Racer").unwrap(),
                    Email::new("race@example.com").unwrap(),
                );
                repo.create(&user, &Credential::new(user.user_id, password))
                    .await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => created += 1,
                Err(AuthError::DuplicateEmail) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);

        let email = Email::new("race@example.com").unwrap();
        assert!(repo.exists_by_email(&email).await.unwrap());
    }
}
