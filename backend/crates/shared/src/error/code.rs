//! Stable Error Codes
//!
//! Machine-readable codes carried in the `code` member of problem responses.
//! Clients branch on these, never on the human-readable `detail`.

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL: &str = "INTERNAL";
