//! Page model (a link filed under a category)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Page record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Page {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub url: String,
    /// Number of click-throughs via `/goto`
    pub views: i32,
}

/// Add page request (category given by slug in the path)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePage {
    #[validate(length(min = 1, max = 128, message = "Title must be 1 to 128 characters"))]
    pub title: String,
    #[validate(
        url(message = "Invalid URL"),
        length(max = 200, message = "URL must be at most 200 characters")
    )]
    pub url: String,
}

/// Add a search result as a page of a category, if not already present
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AutoAddPage {
    pub category_id: i32,
    #[validate(length(min = 1, max = 128, message = "Title must be 1 to 128 characters"))]
    pub title: String,
    #[validate(
        url(message = "Invalid URL"),
        length(max = 200, message = "URL must be at most 200 characters")
    )]
    pub url: String,
}

/// Query parameters for following a page link
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct GotoQuery {
    /// Left as text so that malformed ids fall back to the home redirect
    pub page_id: Option<String>,
}
