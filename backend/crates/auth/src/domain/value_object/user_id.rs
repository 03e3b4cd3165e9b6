//! User Identifier
//!
//! Users share their identifier type with the feed through the kernel.

pub use kernel::id::UserId;
