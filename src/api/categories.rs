//! Category API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        category::{Category, CategoryDetail, CreateCategory, LikeQuery, SuggestQuery},
        page::CreatePage,
        search::{SearchRequest, SearchResult},
    },
};

#[derive(Serialize, ToSchema)]
pub struct LikeResponse {
    pub likes: i32,
}

/// Category page after a web search
#[derive(Serialize, ToSchema)]
pub struct CategorySearchResponse {
    #[serde(flatten)]
    pub detail: CategoryDetail,
    pub results: Vec<SearchResult>,
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories by name", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// Add a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "Name or slug already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_category(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.catalog.add_category(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category and its pages by slug
#[utoipa::path(
    get,
    path = "/categories/{slug}",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category details", body = CategoryDetail),
        (status = 404, description = "Unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn show_category(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CategoryDetail>> {
    let detail = state.services.catalog.show_category(&slug).await?;
    Ok(Json(detail))
}

/// Search the web from a category page
#[utoipa::path(
    post,
    path = "/categories/{slug}/search",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Category details with search results", body = CategorySearchResponse)
    )
)]
pub async fn search_category(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<CategorySearchResponse>> {
    let mut detail = state.services.catalog.show_category(&slug).await?;

    let query = request.query.trim();
    let results = if query.is_empty() {
        Vec::new()
    } else {
        let results = state.services.search.run_query(query).await?;
        detail.query = query.to_string();
        results
    };

    Ok(Json(CategorySearchResponse { detail, results }))
}

/// Add a page to a category
#[utoipa::path(
    post,
    path = "/categories/{slug}/pages",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    request_body = CreatePage,
    responses(
        (status = 201, description = "Page added; updated category", body = CategoryDetail),
        (status = 404, description = "Unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_page(
    State(state): State<crate::AppState>,
    Path(slug): Path<String>,
    Json(data): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<CategoryDetail>)> {
    let detail = state.services.catalog.add_page(&slug, &data).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Like a category
#[utoipa::path(
    get,
    path = "/like",
    tag = "categories",
    params(LikeQuery),
    responses(
        (status = 200, description = "New like count", body = LikeResponse)
    )
)]
pub async fn like_category(
    State(state): State<crate::AppState>,
    Query(query): Query<LikeQuery>,
) -> AppResult<Json<LikeResponse>> {
    let likes = state.services.catalog.like_category(query.category_id).await?;
    Ok(Json(LikeResponse { likes }))
}

/// Suggest categories by name prefix
#[utoipa::path(
    get,
    path = "/suggest",
    tag = "categories",
    params(SuggestQuery),
    responses(
        (status = 200, description = "Matching categories, or all by likes", body = Vec<Category>)
    )
)]
pub async fn suggest_categories(
    State(state): State<crate::AppState>,
    Query(query): Query<SuggestQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state
        .services
        .catalog
        .suggest_categories(&query.suggestion)
        .await?;
    Ok(Json(categories))
}
