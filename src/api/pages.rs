//! Page API endpoints

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::page::{AutoAddPage, GotoQuery, Page},
};

use super::API_PREFIX;

/// File a search result under a category
#[utoipa::path(
    post,
    path = "/pages",
    tag = "pages",
    request_body = AutoAddPage,
    responses(
        (status = 200, description = "Pages of the category", body = Vec<Page>),
        (status = 404, description = "Unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn auto_add_page(
    State(state): State<crate::AppState>,
    Json(data): Json<AutoAddPage>,
) -> AppResult<Json<Vec<Page>>> {
    let pages = state.services.catalog.auto_add_page(&data).await?;
    Ok(Json(pages))
}

/// Follow a page link, counting the view
#[utoipa::path(
    get,
    path = "/goto",
    tag = "pages",
    params(GotoQuery),
    responses(
        (status = 303, description = "Redirect to the page URL, or home when the page is unknown")
    )
)]
pub async fn goto_url(
    State(state): State<crate::AppState>,
    Query(query): Query<GotoQuery>,
) -> Response {
    let Some(id) = query.page_id.as_deref().and_then(|id| id.trim().parse::<i32>().ok()) else {
        return Redirect::to(API_PREFIX).into_response();
    };

    match state.services.catalog.goto_page(id).await {
        Ok(url) => redirect_to(&url),
        Err(AppError::NotFound(_)) => Redirect::to(API_PREFIX).into_response(),
        Err(e) => {
            tracing::warn!("Failed to record view of page {}: {}", id, e);
            Redirect::to(API_PREFIX).into_response()
        }
    }
}

/// 303 to `url`, or to the API home when `url` is not a valid header value
fn redirect_to(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::warn!("Stored page URL {:?} cannot be used as a redirect", url);
            Redirect::to(API_PREFIX).into_response()
        }
    }
}
