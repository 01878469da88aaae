//! Home and about endpoints; both count a visit for the caller's session

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Category, Page, VisitRecord},
};

use super::VisitorSession;

pub const BOLD_MESSAGE: &str = "Crunchy, creamy, cookie, candy, cupcake!";
pub const ABOUT_MESSAGE: &str = "Rango says here is the about page. This tutorial has been put together by the Rango team.";

#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    /// Five most liked categories
    pub categories: Vec<Category>,
    /// Five most viewed pages
    pub pages: Vec<Page>,
    pub visits: VisitRecord,
}

#[derive(Serialize, ToSchema)]
pub struct AboutResponse {
    pub message: String,
    pub visits: VisitRecord,
}

/// Home overview
#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Top categories and pages with the session's visit count", body = IndexResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    session: VisitorSession,
) -> AppResult<(CookieJar, Json<IndexResponse>)> {
    let (categories, pages) = state.services.catalog.overview().await?;
    let visits = state.services.visits.record_visit(&session.id).await?;

    Ok((
        session.jar,
        Json(IndexResponse {
            message: BOLD_MESSAGE.to_string(),
            categories,
            pages,
            visits,
        }),
    ))
}

/// About page
#[utoipa::path(
    get,
    path = "/about",
    tag = "home",
    responses(
        (status = 200, description = "About message with the session's visit count", body = AboutResponse)
    )
)]
pub async fn about(
    State(state): State<crate::AppState>,
    session: VisitorSession,
) -> AppResult<(CookieJar, Json<AboutResponse>)> {
    let visits = state.services.visits.record_visit(&session.id).await?;

    Ok((
        session.jar,
        Json(AboutResponse {
            message: ABOUT_MESSAGE.to_string(),
            visits,
        }),
    ))
}
