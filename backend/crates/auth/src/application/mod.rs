//! Application Layer
//!
//! Use cases and application services.

pub mod access_guard;
pub mod authenticate;
pub mod config;
pub mod register;
pub mod session_token;

// Re-exports
pub use access_guard::{AccessGuard, AuthenticatedUser};
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::AuthConfig;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session_token::{IssuedToken, SessionTokenService, TokenError};
