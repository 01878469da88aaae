//! Category and page management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        category::{Category, CategoryDetail, CreateCategory},
        page::{AutoAddPage, CreatePage, Page},
    },
    repository::Repository,
};

/// How many categories and pages the home overview lists
pub const TOP_LIMIT: i64 = 5;
/// Maximum suggestions returned for a non-empty prefix
pub const SUGGESTION_LIMIT: i64 = 8;

/// Longest URL the `pages.url` column holds
const MAX_URL_LEN: usize = 200;

/// Trimmed title and normalized URL of a page.
///
/// The URL is stored in its parsed form, so control characters and other
/// unsafe bytes end up percent-encoded.
fn page_fields<'a>(title: &'a str, url: &str) -> AppResult<(&'a str, String)> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be blank".to_string()));
    }

    let url = reqwest::Url::parse(url.trim())
        .map_err(|e| AppError::Validation(format!("Invalid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation("URL must use http or https".to_string()));
    }
    let url = url.as_str().to_string();
    if url.len() > MAX_URL_LEN {
        return Err(AppError::Validation(format!(
            "URL must be at most {} characters",
            MAX_URL_LEN
        )));
    }
    Ok((title, url))
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Most liked categories and most viewed pages
    pub async fn overview(&self) -> AppResult<(Vec<Category>, Vec<Page>)> {
        let categories = self.repository.categories_top_liked(TOP_LIMIT).await?;
        let pages = self.repository.pages_top_viewed(TOP_LIMIT).await?;
        Ok((categories, pages))
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories_list().await
    }

    /// Category by slug with its pages, most viewed first
    pub async fn show_category(&self, slug: &str) -> AppResult<CategoryDetail> {
        let category = self.repository.categories_get_by_slug(slug).await?;
        let pages = self.repository.pages_by_category(category.id).await?;
        let query = category.name.clone();
        Ok(CategoryDetail {
            category,
            pages,
            query,
        })
    }

    pub async fn add_category(&self, data: &CreateCategory) -> AppResult<Category> {
        data.validate()?;
        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name must not be blank".to_string()));
        }

        let category = self.repository.categories_create(name).await?;
        tracing::info!("Category created: {} ({})", category.name, category.slug);
        Ok(category)
    }

    /// Add a page to the category identified by `slug`
    pub async fn add_page(&self, slug: &str, data: &CreatePage) -> AppResult<CategoryDetail> {
        data.validate()?;
        let (title, url) = page_fields(&data.title, &data.url)?;
        let category = self.repository.categories_get_by_slug(slug).await?;
        let page = self.repository.pages_create(category.id, title, &url).await?;
        tracing::info!("Page {} added to category {}", page.id, category.slug);
        self.show_category(slug).await
    }

    /// Increment a category's likes and return the new total
    pub async fn like_category(&self, id: i32) -> AppResult<i32> {
        self.repository.categories_like(id).await
    }

    /// Categories starting with `starts_with`, or every category by likes
    /// when the prefix is blank or matches nothing
    pub async fn suggest_categories(&self, starts_with: &str) -> AppResult<Vec<Category>> {
        let matches = if starts_with.trim().is_empty() {
            Vec::new()
        } else {
            self.repository
                .categories_starting_with(starts_with, SUGGESTION_LIMIT)
                .await?
        };

        if matches.is_empty() {
            return self.repository.categories_top_liked(i64::MAX).await;
        }
        Ok(matches)
    }

    /// File a search result under a category unless it is already there
    pub async fn auto_add_page(&self, data: &AutoAddPage) -> AppResult<Vec<Page>> {
        data.validate()?;
        let (title, url) = page_fields(&data.title, &data.url)?;
        let category = self.repository.categories_get_by_id(data.category_id).await?;
        self.repository
            .pages_get_or_create(category.id, title, &url)
            .await?;
        self.repository.pages_by_category(category.id).await
    }

    /// Count a click-through and return the page's URL
    pub async fn goto_page(&self, id: i32) -> AppResult<String> {
        let page = self.repository.pages_record_view(id).await?;
        Ok(page.url)
    }
}
