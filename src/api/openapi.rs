//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{categories, health, home, pages, search};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rango API",
        version = "0.3.0",
        description = "Link directory REST API with per-session visit counting",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        home::index,
        home::about,
        // Categories
        categories::list_categories,
        categories::add_category,
        categories::show_category,
        categories::search_category,
        categories::add_page,
        categories::like_category,
        categories::suggest_categories,
        // Pages
        pages::auto_add_page,
        pages::goto_url,
        // Search
        search::search,
    ),
    components(
        schemas(
            // Home
            home::IndexResponse,
            home::AboutResponse,
            crate::models::visit::VisitRecord,
            // Categories
            crate::models::category::Category,
            crate::models::category::CategoryDetail,
            crate::models::category::CreateCategory,
            crate::models::category::LikeQuery,
            crate::models::category::SuggestQuery,
            categories::LikeResponse,
            categories::CategorySearchResponse,
            // Pages
            crate::models::page::Page,
            crate::models::page::CreatePage,
            crate::models::page::AutoAddPage,
            crate::models::page::GotoQuery,
            // Search
            crate::models::search::SearchRequest,
            crate::models::search::SearchResponse,
            crate::models::search::SearchResult,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "home", description = "Visit-counted landing pages"),
        (name = "categories", description = "Category management"),
        (name = "pages", description = "Page links"),
        (name = "search", description = "Web search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
