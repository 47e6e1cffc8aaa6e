//! Repository for the `tickets` table.

use sqlx::SqlitePool;

use festival_core::ordering::ReorderItem;
use festival_core::ticket::TicketType;
use festival_core::types::{DbId, Version};

use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use crate::ordering::{reorder_rows, OrderedTable, ReorderError};

/// Column list for `tickets` queries.
const COLUMNS: &str = "\
    id, title, price, price_amount, badge, description, features, button_text, \
    ticket_type, sort_order, active, version, created_at, updated_at";

const TABLE: OrderedTable = OrderedTable {
    table: "tickets",
    scope_column: None,
};

/// Provides data access for ticket tiers.
pub struct TicketRepo;

impl TicketRepo {
    /// Every ticket tier in display order.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY sort_order, id");
        sqlx::query_as::<_, Ticket>(&query).fetch_all(pool).await
    }

    /// Tiers flagged active, for the public ticket page.
    pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE active = 1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Ticket>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Highest `sort_order` across tickets, `None` when there are none.
    pub async fn max_order(pool: &SqlitePool) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(sort_order) FROM tickets")
            .fetch_one(pool)
            .await
    }

    /// Insert a ticket tier at `order` with its parsed `price_amount`.
    pub async fn create(
        pool: &SqlitePool,
        dto: &CreateTicket,
        order: i32,
        price_amount: i64,
    ) -> Result<Ticket, sqlx::Error> {
        let ticket_type = dto.ticket_type.unwrap_or(TicketType::Active);
        let query = format!(
            "INSERT INTO tickets \
                 (title, price, price_amount, badge, description, features, button_text, \
                  ticket_type, sort_order, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(dto.title.trim())
            .bind(dto.price.trim())
            .bind(price_amount)
            .bind(&dto.badge)
            .bind(&dto.description)
            .bind(&dto.features)
            .bind(&dto.button_text)
            .bind(ticket_type.as_str())
            .bind(order)
            .bind(dto.active)
            .fetch_one(pool)
            .await
    }

    /// Partially update a ticket still at `expected_version`.
    ///
    /// `price_amount` is passed whenever `price` changes.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        expected_version: Version,
        dto: &UpdateTicket,
        price_amount: Option<i64>,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET \
                 title = COALESCE($3, title), \
                 price = COALESCE($4, price), \
                 price_amount = COALESCE($5, price_amount), \
                 badge = CASE WHEN $6 THEN $7 ELSE badge END, \
                 description = CASE WHEN $8 THEN $9 ELSE description END, \
                 features = CASE WHEN $10 THEN $11 ELSE features END, \
                 button_text = CASE WHEN $12 THEN $13 ELSE button_text END, \
                 ticket_type = COALESCE($14, ticket_type), \
                 sort_order = COALESCE($15, sort_order), \
                 active = COALESCE($16, active), \
                 version = version + 1, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.price.as_deref().map(str::trim))
            .bind(price_amount)
            .bind(dto.badge.is_some())
            .bind(dto.badge.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.description.is_some())
            .bind(dto.description.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.features.is_some())
            .bind(dto.features.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.button_text.is_some())
            .bind(dto.button_text.as_ref().and_then(|v| v.as_deref()))
            .bind(dto.ticket_type.map(TicketType::as_str))
            .bind(dto.order)
            .bind(dto.active)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reorder all ticket tiers; see [`reorder_rows`].
    pub async fn reorder(pool: &SqlitePool, items: &[ReorderItem]) -> Result<usize, ReorderError> {
        reorder_rows(pool, TABLE, None, items).await
    }
}
