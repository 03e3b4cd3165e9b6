//! Display Name Value Object
//!
//! 表示名は投稿やコメントの横に表示される人間向けの名前。
//! ログインには使用しないため、重複は許可する。
//!
//! ## 不変条件
//! - NFKC正規化 → 前後の空白を除去 → 検証 の順で処理
//! - 長さ: 2〜64文字（正規化後）
//! - 制御文字禁止

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for display name (in characters)
pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;

/// Maximum length for display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 64;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name with validation
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Full name is required"));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request("Full name contains invalid characters"));
        }

        let len = trimmed.chars().count();
        if len < DISPLAY_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at least {} characters",
                DISPLAY_NAME_MIN_LENGTH
            )));
        }
        if len > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        DisplayName::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
