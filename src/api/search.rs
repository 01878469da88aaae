//! Web search endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::search::{SearchRequest, SearchResponse},
};

/// Search the web
#[utoipa::path(
    post,
    path = "/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 502, description = "Search API failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Ok(Json(SearchResponse {
            query: None,
            results: Vec::new(),
        }));
    }

    let results = state.services.search.run_query(query).await?;
    Ok(Json(SearchResponse {
        query: Some(query.to_string()),
        results,
    }))
}
