//! Repository for the `performers` table.
//!
//! Slugs and years are resolved by the caller; this layer only persists them.

use sqlx::types::Json;
use sqlx::SqlitePool;

use festival_core::ordering::ReorderItem;
use festival_core::performer::PerformerLinks;
use festival_core::types::{DbId, Version};

use crate::models::performer::{CreatePerformer, Performer, UpdatePerformer};
use crate::ordering::{reorder_rows, OrderedTable, ReorderError};

/// Column list for `performers` queries.
const COLUMNS: &str = "\
    id, slug, name, genre, photo, description, links, year, video_url, \
    active, sort_order, version, created_at, updated_at";

const TABLE: OrderedTable = OrderedTable {
    table: "performers",
    scope_column: None,
};

/// Provides data access for performers.
pub struct PerformerRepo;

impl PerformerRepo {
    /// Every performer, active or not, in display order.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Performer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM performers ORDER BY sort_order, id");
        sqlx::query_as::<_, Performer>(&query)
            .fetch_all(pool)
            .await
    }

    /// Active performers of the given festival year.
    pub async fn list_program(pool: &SqlitePool, year: i32) -> Result<Vec<Performer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM performers \
             WHERE year = $1 AND active = 1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Performer>(&query)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    /// Active performers of editions before `year`, newest edition first.
    pub async fn list_archive(pool: &SqlitePool, year: i32) -> Result<Vec<Performer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM performers \
             WHERE year < $1 AND active = 1 \
             ORDER BY year DESC, sort_order, id"
        );
        sqlx::query_as::<_, Performer>(&query)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Performer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM performers WHERE id = $1");
        sqlx::query_as::<_, Performer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &SqlitePool,
        slug: &str,
    ) -> Result<Option<Performer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM performers WHERE slug = $1");
        sqlx::query_as::<_, Performer>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a performer under a precomputed `slug` and resolved `year`.
    ///
    /// Two performers with the same name in the same year collide on
    /// `uq_performers_slug`.
    pub async fn create(
        pool: &SqlitePool,
        dto: &CreatePerformer,
        slug: &str,
        year: i32,
    ) -> Result<Performer, sqlx::Error> {
        let links = dto.links.clone().unwrap_or_default().normalized();
        let query = format!(
            "INSERT INTO performers \
                 (slug, name, genre, photo, description, links, year, video_url, \
                  active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 1), COALESCE($10, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Performer>(&query)
            .bind(slug)
            .bind(dto.name.trim())
            .bind(dto.genre.trim())
            .bind(&dto.photo)
            .bind(&dto.description)
            .bind(Json(&links))
            .bind(year)
            .bind(&dto.video_url)
            .bind(dto.active)
            .bind(dto.order)
            .fetch_one(pool)
            .await
    }

    /// Partially update a performer still at `expected_version`.
    ///
    /// `slug` and `year` are always written since the slug depends on both
    /// the final name and the final year. Nullable columns are cleared by an
    /// explicit `null` and kept when the key is absent.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        expected_version: Version,
        dto: &UpdatePerformer,
        slug: &str,
        year: i32,
    ) -> Result<Option<Performer>, sqlx::Error> {
        let links: Option<PerformerLinks> = dto.links.clone().map(PerformerLinks::normalized);
        let query = format!(
            "UPDATE performers SET \
                 slug = $3, \
                 year = $4, \
                 name = COALESCE($5, name), \
                 genre = COALESCE($6, genre), \
                 photo = CASE WHEN $7 THEN $8 ELSE photo END, \
                 description = CASE WHEN $9 THEN $10 ELSE description END, \
                 links = COALESCE($11, links), \
                 video_url = CASE WHEN $12 THEN $13 ELSE video_url END, \
                 active = COALESCE($14, active), \
                 sort_order = COALESCE($15, sort_order), \
                 version = version + 1, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Performer>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(slug)
            .bind(year)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.genre.as_deref().map(str::trim))
            .bind(dto.photo.is_some())
            .bind(dto.photo.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.description.is_some())
            .bind(dto.description.as_ref().and_then(|v| v.as_deref()))
            .bind(links.map(Json))
            .bind(dto.video_url.is_some())
            .bind(dto.video_url.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.active)
            .bind(dto.order)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM performers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reorder the whole performer roster; see [`reorder_rows`].
    pub async fn reorder(pool: &SqlitePool, items: &[ReorderItem]) -> Result<usize, ReorderError> {
        reorder_rows(pool, TABLE, None, items).await
    }
}
