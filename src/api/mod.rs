//! API handlers for Rango REST endpoints

pub mod categories;
pub mod health;
pub mod home;
pub mod openapi;
pub mod pages;
pub mod search;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::AppState;

/// Mount point of the JSON API
pub const API_PREFIX: &str = "/api/v1";

/// Browsing session of the caller, identified by the session cookie.
///
/// A missing or malformed cookie starts a new session. `jar` always carries
/// the session cookie so handlers return it to refresh the client's copy.
pub struct VisitorSession {
    pub id: String,
    pub jar: CookieJar,
}

#[async_trait]
impl FromRequestParts<AppState> for VisitorSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let jar = CookieJar::from_headers(&parts.headers);

        let id = match jar
            .get(cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                tracing::debug!("New session {}", id);
                id
            }
        };

        let cookie = Cookie::build((cookie_name.clone(), id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);

        Ok(VisitorSession {
            id,
            jar: jar.add(cookie),
        })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Visit-tracked pages
        .route("/", get(home::index))
        .route("/about", get(home::about))
        // Categories
        .route("/categories", get(categories::list_categories))
        .route("/categories", post(categories::add_category))
        .route("/categories/:slug", get(categories::show_category))
        .route("/categories/:slug/search", post(categories::search_category))
        .route("/categories/:slug/pages", post(categories::add_page))
        .route("/like", get(categories::like_category))
        .route("/suggest", get(categories::suggest_categories))
        // Pages
        .route("/pages", post(pages::auto_add_page))
        .route("/goto", get(pages::goto_url))
        // Web search
        .route("/search", post(search::search))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
