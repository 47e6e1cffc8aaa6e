//! Display ordering for drag-and-drop collections.
//!
//! Sections of a page, performers and tickets each carry an integer
//! `order`. A reorder always rewrites the whole collection to `0..n-1`;
//! there is no gap-based insertion. [`plan_reorder`] checks a client's
//! requested arrangement against the current rows so a stale arrangement is
//! rejected instead of silently reverting a concurrent edit.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Version};

/// Current persisted position of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedRow {
    pub id: DbId,
    pub order: i32,
    pub version: Version,
}

/// One entry of a reorder request, listed in the desired order.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReorderItem {
    pub id: DbId,
    /// Version the client last saw. `None` skips the check for this row.
    pub version: Option<Version>,
}

/// Body of a reorder request: the full collection in its new order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

/// Row whose stored `order` must change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub id: DbId,
    pub order: i32,
}

/// Position appended after the current last element.
///
/// Fails when the last element already sits at `i32::MAX`; a reorder
/// compacts the collection back to `0..n-1`.
pub fn next_order(current_max: Option<i32>) -> Result<i32, CoreError> {
    match current_max {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            CoreError::Validation(
                "No position left after the last element; reorder the collection or pass an explicit order"
                    .into(),
            )
        }),
    }
}

/// Compute the writes needed to put `current` into the `requested` order.
///
/// Rules:
/// - every id in `requested` must be distinct;
/// - the id set must equal the id set of `current` (a row added or removed
///   since the client's read is a conflict);
/// - each supplied version must equal the stored version.
///
/// Returns only rows whose order actually changes, with new orders forming
/// `0..n-1` across the full collection.
pub fn plan_reorder(
    current: &[OrderedRow],
    requested: &[ReorderItem],
) -> Result<Vec<OrderChange>, CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    for item in requested {
        if !seen.insert(item.id) {
            return Err(CoreError::Validation(format!(
                "Duplicate id {} in reorder request",
                item.id
            )));
        }
    }

    let by_id: HashMap<DbId, &OrderedRow> = current.iter().map(|row| (row.id, row)).collect();

    if requested.len() != current.len() || !requested.iter().all(|i| by_id.contains_key(&i.id)) {
        return Err(CoreError::Conflict(
            "Collection changed since it was read; reload and retry".into(),
        ));
    }

    let mut changes = Vec::new();
    for (position, item) in requested.iter().enumerate() {
        let row = by_id[&item.id];
        if let Some(expected) = item.version {
            if expected != row.version {
                return Err(CoreError::Conflict(format!(
                    "Row {} was modified concurrently (expected version {expected}, found {})",
                    row.id, row.version
                )));
            }
        }
        let order = i32::try_from(position)
            .map_err(|_| CoreError::Validation("Collection too large to reorder".into()))?;
        if row.order != order {
            changes.push(OrderChange { id: row.id, order });
        }
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use assert_matches::assert_matches;

    use super::*;

    fn rows(orders: &[(DbId, i32)]) -> Vec<OrderedRow> {
        orders
            .iter()
            .map(|&(id, order)| OrderedRow { id, order, version: 1 })
            .collect()
    }

    fn request(ids: &[DbId]) -> Vec<ReorderItem> {
        ids.iter().map(|&id| ReorderItem { id, version: None }).collect()
    }

    /// Apply changes on top of current rows and return the resulting orders.
    fn apply(current: &[OrderedRow], changes: &[OrderChange]) -> Vec<(DbId, i32)> {
        current
            .iter()
            .map(|row| {
                let order = changes
                    .iter()
                    .find(|c| c.id == row.id)
                    .map_or(row.order, |c| c.order);
                (row.id, order)
            })
            .collect()
    }

    #[test]
    fn next_order_appends() {
        assert_eq!(next_order(None).unwrap(), 0);
        assert_eq!(next_order(Some(4)).unwrap(), 5);
        assert_eq!(next_order(Some(-3)).unwrap(), -2);
    }

    #[test]
    fn next_order_at_the_top_is_rejected() {
        assert_matches!(next_order(Some(i32::MAX)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reorder_yields_dense_sequence() {
        // Sparse, duplicated legacy orders.
        let current = rows(&[(1, 5), (2, 5), (3, 40), (4, -1)]);
        let changes = plan_reorder(&current, &request(&[3, 1, 4, 2])).unwrap();
        let result = apply(&current, &changes);

        let orders: BTreeSet<i32> = result.iter().map(|&(_, o)| o).collect();
        assert_eq!(orders, (0..4).collect());
        assert_eq!(result, vec![(1, 1), (2, 3), (3, 0), (4, 2)]);
    }

    #[test]
    fn unchanged_rows_are_not_rewritten() {
        let current = rows(&[(1, 0), (2, 1), (3, 2)]);
        let changes = plan_reorder(&current, &request(&[2, 1, 3])).unwrap();
        assert_eq!(
            changes,
            vec![OrderChange { id: 2, order: 0 }, OrderChange { id: 1, order: 1 }]
        );
    }

    #[test]
    fn missing_row_is_conflict() {
        let current = rows(&[(1, 0), (2, 1), (3, 2)]);
        let result = plan_reorder(&current, &request(&[2, 1]));
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn unknown_row_is_conflict() {
        let current = rows(&[(1, 0), (2, 1)]);
        let result = plan_reorder(&current, &request(&[2, 9]));
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let current = rows(&[(1, 0), (2, 1)]);
        let result = plan_reorder(&current, &request(&[1, 1]));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn stale_version_is_conflict() {
        let mut current = rows(&[(1, 0), (2, 1)]);
        current[1].version = 3;
        let requested = vec![
            ReorderItem { id: 2, version: Some(2) },
            ReorderItem { id: 1, version: Some(1) },
        ];
        assert_matches!(plan_reorder(&current, &requested), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn empty_collection_is_a_no_op() {
        assert!(plan_reorder(&[], &[]).unwrap().is_empty());
    }
}
