//! Transactional reorder shared by every ordered table.

use festival_core::error::CoreError;
use festival_core::ordering::{plan_reorder, OrderedRow, ReorderItem};
use festival_core::types::{DbId, Version};
use sqlx::SqlitePool;

/// Failure of a reorder: either the request was rejected against the
/// current rows, or the database failed.
#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// An ordered table, optionally scoped to a parent row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderedTable {
    pub table: &'static str,
    pub scope_column: Option<&'static str>,
}

/// Rewrite `sort_order` of every row in scope to match `items`.
///
/// Reads the current rows and writes the changed ones in one transaction,
/// bumping `version` on each row that moves. Returns the number of rows
/// written.
pub(crate) async fn reorder_rows(
    pool: &SqlitePool,
    target: OrderedTable,
    scope_id: Option<DbId>,
    items: &[ReorderItem],
) -> Result<usize, ReorderError> {
    let table = target.table;
    let filter = match target.scope_column {
        Some(column) => format!("WHERE {column} = $1"),
        None => String::new(),
    };

    let mut tx = pool.begin().await?;

    let select = format!("SELECT id, sort_order, version FROM {table} {filter}");
    let mut query = sqlx::query_as::<_, (DbId, i32, Version)>(&select);
    if let Some(id) = scope_id {
        query = query.bind(id);
    }
    let rows = query.fetch_all(&mut *tx).await?;
    let current: Vec<OrderedRow> = rows
        .into_iter()
        .map(|(id, order, version)| OrderedRow { id, order, version })
        .collect();

    let changes = plan_reorder(&current, items)?;

    let update = format!(
        "UPDATE {table} SET sort_order = $1, version = version + 1, \
             updated_at = CURRENT_TIMESTAMP \
         WHERE id = $2"
    );
    for change in &changes {
        sqlx::query(&update)
            .bind(change.order)
            .bind(change.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(table, scope_id, changed = changes.len(), "Collection reordered");
    Ok(changes.len())
}
