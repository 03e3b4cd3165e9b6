//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;

use platform::password::{PasswordHashError, PasswordService};

use crate::application::config::AuthConfig;
use crate::application::{
    AccessGuard, AuthenticateInput, AuthenticateUseCase, RegisterInput, RegisterUseCase,
    SessionTokenService,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, SignUpRequest, SignUpResponse};

/// Shared state for auth handlers
pub struct AuthAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub passwords: PasswordService,
    pub tokens: SessionTokenService,
}

impl<U> Clone for AuthAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            passwords: self.passwords.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<U> AuthAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    /// Build the state, deriving the password and token services from `config`
    pub fn new(repo: Arc<U>, config: AuthConfig) -> Result<Self, PasswordHashError> {
        Ok(Self {
            passwords: config.password_service()?,
            tokens: SessionTokenService::new(Arc::new(config)),
            repo,
        })
    }

    /// Guard sharing this state's repository and token secret
    pub fn access_guard(&self) -> AccessGuard<U> {
        AccessGuard::new(self.repo.clone(), self.tokens.clone())
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AuthError::Validation(e.body_text()))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<U>(
    State(state): State<AuthAppState<U>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    U: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.passwords.clone());

    let output = use_case
        .execute(RegisterInput {
            display_name: req.full_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User created",
            user_id: output.user_id.to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<U>(
    State(state): State<AuthAppState<U>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.passwords.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(AuthenticateInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        expires_at_ms: output.token.expires_at_ms(),
        token: output.token.token,
        user_id: output.user_id.to_string(),
        display_name: output.display_name.to_string(),
    }))
}
