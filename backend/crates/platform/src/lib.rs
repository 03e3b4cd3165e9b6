//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with tunable cost, constant-time verify)
//! - Cryptographic utilities (HMAC-SHA256 signing, Base64url, randomness)
//! - Bearer credential extraction from HTTP headers

pub mod bearer;
pub mod crypto;
pub mod password;
