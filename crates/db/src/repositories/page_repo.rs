//! Repository for the `pages` table.

use sqlx::SqlitePool;

use festival_core::types::{DbId, Version};

use crate::models::page::{CreatePage, Page, PageSummary, UpdatePage};

/// Column list for `pages` queries.
const COLUMNS: &str = "id, slug, title, description, version, created_at, updated_at";

/// Provides data access for pages.
pub struct PageRepo;

impl PageRepo {
    /// List every page with its section count, in creation order.
    pub async fn list_with_counts(pool: &SqlitePool) -> Result<Vec<PageSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, \
                 (SELECT COUNT(*) FROM sections s WHERE s.page_id = pages.id) AS section_count \
             FROM pages ORDER BY id"
        );
        sqlx::query_as::<_, PageSummary>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE slug = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a page under an already validated `slug`.
    ///
    /// A taken slug surfaces as a unique violation on `uq_pages_slug`.
    pub async fn create(
        pool: &SqlitePool,
        dto: &CreatePage,
        slug: &str,
    ) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (slug, title, description) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .bind(dto.title.trim())
            .bind(&dto.description)
            .fetch_one(pool)
            .await
    }

    /// Partially update a page if it is still at `expected_version`.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        expected_version: Version,
        dto: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 version = version + 1, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(&dto.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a page. Its sections go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
