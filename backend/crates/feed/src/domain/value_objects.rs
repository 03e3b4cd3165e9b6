//! Feed Value Objects
//!
//! Post title, post body, comment text and category. Text values are
//! trimmed before validation and counted in characters, not bytes.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum post title length (in characters)
pub const TITLE_MAX_LENGTH: usize = 200;

/// Maximum post body length (in characters)
pub const BODY_MAX_LENGTH: usize = 5000;

/// Maximum comment length (in characters)
pub const COMMENT_MAX_LENGTH: usize = 1000;

fn bounded_text(raw: &str, field: &str, max: usize) -> AppResult<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }

    let len = trimmed.chars().count();
    if len > max {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }

    Ok(trimmed.to_string())
}

// ============================================================================
// Category
// ============================================================================

/// Fixed set of post categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("news")]
    News,
    #[display("culture")]
    Culture,
    #[display("business")]
    Business,
    #[display("music")]
    Music,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::News,
        Category::Culture,
        Category::Business,
        Category::Music,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Culture => "culture",
            Category::Business => "business",
            Category::Music => "music",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Err(AppError::bad_request("Category is required"));
        }

        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AppError::bad_request(format!("Unknown category: {wanted}"))
                    .with_action("Choose one of: news, culture, business, music")
            })
    }
}

// ============================================================================
// Text values
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded_text(raw, "Title", TITLE_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded_text(raw, "Description", BODY_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded_text(raw, "Comment", COMMENT_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_category_parse() {
        assert_eq!("news".parse::<Category>().unwrap(), Category::News);
        assert_eq!(" Music ".parse::<Category>().unwrap(), Category::Music);
        assert!("sports".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_matches_wire() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(PostTitle::new("  Storm hits town ").unwrap().as_str(), "Storm hits town");
        assert_eq!(CommentText::new("\tStay safe\n").unwrap().as_str(), "Stay safe");
    }

    #[test]
    fn test_blank_text_rejected() {
        for raw in ["", "   ", "\n\t"] {
            let err = CommentText::new(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest);
            assert!(PostTitle::new(raw).is_err());
            assert!(PostBody::new(raw).is_err());
        }
    }

    #[test]
    fn test_length_limits() {
        assert!(PostTitle::new(&"t".repeat(TITLE_MAX_LENGTH)).is_ok());
        assert!(PostTitle::new(&"t".repeat(TITLE_MAX_LENGTH + 1)).is_err());
        assert!(PostBody::new(&"b".repeat(BODY_MAX_LENGTH + 1)).is_err());
        assert!(CommentText::new(&"c".repeat(COMMENT_MAX_LENGTH + 1)).is_err());
        // Characters, not bytes
        assert!(CommentText::new(&"雨".repeat(COMMENT_MAX_LENGTH)).is_ok());
    }
}
