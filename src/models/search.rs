//! Web search models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub summary: String,
}

/// Search request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

/// Search response body
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Trimmed query, absent when nothing was searched
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
}
