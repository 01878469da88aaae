//! Page domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::page::Page,
};

impl Repository {
    /// Most viewed pages across all categories
    pub async fn pages_top_viewed(&self, limit: i64) -> AppResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages ORDER BY views DESC, title LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Pages of a category, most viewed first
    pub async fn pages_by_category(&self, category_id: i32) -> AppResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages WHERE category_id = $1 ORDER BY views DESC, title",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn pages_create(&self, category_id: i32, title: &str, url: &str) -> AppResult<Page> {
        let row = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (category_id, title, url, views)
            VALUES ($1, $2, $3, 0)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(title)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Return the page matching all three fields, creating it when absent
    pub async fn pages_get_or_create(&self, category_id: i32, title: &str, url: &str) -> AppResult<Page> {
        let existing = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages WHERE category_id = $1 AND title = $2 AND url = $3 LIMIT 1",
        )
        .bind(category_id)
        .bind(title)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        match existing {
            Some(page) => Ok(page),
            None => self.pages_create(category_id, title, url).await,
        }
    }

    /// Set url and views of the page titled `title` in a category (population script)
    pub async fn pages_upsert(&self, category_id: i32, title: &str, url: &str, views: i32) -> AppResult<Page> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Page>(
            "UPDATE pages SET url = $3, views = $4 WHERE category_id = $1 AND title = $2 RETURNING *",
        )
        .bind(category_id)
        .bind(title)
        .bind(url)
        .bind(views)
        .fetch_optional(&mut *tx)
        .await?;

        let page = match updated {
            Some(page) => page,
            None => {
                sqlx::query_as::<_, Page>(
                    r#"
                    INSERT INTO pages (category_id, title, url, views)
                    VALUES ($1, $2, $3, $4)
                    RETURNING *
                    "#,
                )
                .bind(category_id)
                .bind(title)
                .bind(url)
                .bind(views)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(page)
    }

    /// Count a click-through and return the updated page
    pub async fn pages_record_view(&self, id: i32) -> AppResult<Page> {
        sqlx::query_as::<_, Page>("UPDATE pages SET views = views + 1 WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))
    }
}
