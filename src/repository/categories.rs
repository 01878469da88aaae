//! Category domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::category::{slugify, Category},
};

impl Repository {
    /// All categories by name
    pub async fn categories_list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Most liked categories first
    pub async fn categories_top_liked(&self, limit: i64) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY likes DESC, name LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn categories_get_by_slug(&self, slug: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    pub async fn categories_get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Insert a category, deriving its slug from the name
    pub async fn categories_create(&self, name: &str) -> AppResult<Category> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::Validation(format!(
                "Category name '{}' does not produce a usable slug",
                name
            )));
        }

        let result = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, views, likes)
            VALUES ($1, $2, 0, 0)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(&slug)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("Category '{}' already exists", name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or overwrite counters of a category by name (population script)
    pub async fn categories_upsert(&self, name: &str, views: i32, likes: i32) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, views, likes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE SET views = EXCLUDED.views, likes = EXCLUDED.likes
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slugify(name))
        .bind(views)
        .bind(likes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Increment likes and return the new count
    pub async fn categories_like(&self, id: i32) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE categories SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Categories whose name starts with `prefix`, case-insensitively
    pub async fn categories_starting_with(&self, prefix: &str, limit: i64) -> AppResult<Vec<Category>> {
        let pattern = format!("{}%", escape_like(prefix));
        let rows = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE name ILIKE $1 ESCAPE '\\' ORDER BY name LIMIT $2",
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Escape LIKE wildcards so user input only matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Py"), "Py");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
