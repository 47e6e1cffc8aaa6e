//! Repository for the `sections` table.

use sqlx::types::Json;
use sqlx::SqlitePool;

use festival_core::ordering::ReorderItem;
use festival_core::section::SectionContent;
use festival_core::types::{DbId, Version};

use crate::models::section::Section;
use crate::ordering::{reorder_rows, OrderedTable, ReorderError};

/// Column list for `sections` queries.
const COLUMNS: &str = "\
    id, page_id, section_type, content, sort_order, version, \
    created_at, updated_at";

const TABLE: OrderedTable = OrderedTable {
    table: "sections",
    scope_column: Some("page_id"),
};

/// Provides data access for page sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Sections of a page in display order (ties broken by id).
    pub async fn list_for_page(
        pool: &SqlitePool,
        page_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE page_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Highest `sort_order` on a page, `None` when the page has no sections.
    pub async fn max_order(pool: &SqlitePool, page_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM sections WHERE page_id = $1",
        )
        .bind(page_id)
        .fetch_one(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        page_id: DbId,
        body: &SectionContent,
        order: i32,
    ) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (page_id, section_type, content, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(page_id)
            .bind(body.kind().as_str())
            .bind(Json(body.payload()))
            .bind(order)
            .fetch_one(pool)
            .await
    }

    /// Replace kind, payload and order of a section still at `expected_version`.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        expected_version: Version,
        body: &SectionContent,
        order: i32,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET \
                 section_type = $3, \
                 content = $4, \
                 sort_order = $5, \
                 version = version + 1, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(body.kind().as_str())
            .bind(Json(body.payload()))
            .bind(order)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reorder all sections of a page; see [`reorder_rows`].
    pub async fn reorder(
        pool: &SqlitePool,
        page_id: DbId,
        items: &[ReorderItem],
    ) -> Result<usize, ReorderError> {
        reorder_rows(pool, TABLE, Some(page_id), items).await
    }
}
