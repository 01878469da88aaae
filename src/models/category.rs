//! Category model

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use unicode_normalization::UnicodeNormalization;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::page::Page;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Unique display name
    pub name: String,
    /// URL identifier derived from the name
    pub slug: String,
    pub views: i32,
    pub likes: i32,
}

/// Category with its pages, most viewed first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryDetail {
    pub category: Category,
    pub pages: Vec<Page>,
    /// Default web search query for this category
    pub query: String,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 128, message = "Name must be 1 to 128 characters"))]
    pub name: String,
}

/// Query parameters for liking a category
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LikeQuery {
    pub category_id: i32,
}

/// Query parameters for category suggestions
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SuggestQuery {
    /// Case-insensitive name prefix
    #[serde(default)]
    pub suggestion: String,
}

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Derive a URL slug from a category name.
///
/// Accents are folded to ASCII and anything else non-ASCII is dropped, so
/// `"Crème Brûlée"` becomes `"creme-brulee"`.
pub fn slugify(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let dashed = SEPARATORS.replace_all(cleaned.trim(), "-");
    dashed.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("how do i create a slug in django"),
            "how-do-i-create-a-slug-in-django"
        );
        assert_eq!(slugify("Other Frameworks"), "other-frameworks");
        assert_eq!(slugify("Python"), "python");
    }

    #[test]
    fn test_slugify_punctuation_and_accents() {
        assert_eq!(slugify("  C++ & Rust!  "), "c-rust");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("--a -- b__"), "a-b");
        assert_eq!(slugify("日本"), "");
    }

    #[test]
    fn test_create_category_validation() {
        assert!(CreateCategory { name: "Rust".into() }.validate().is_ok());
        assert!(CreateCategory { name: String::new() }.validate().is_err());
        assert!(CreateCategory { name: "x".repeat(129) }.validate().is_err());
    }
}
