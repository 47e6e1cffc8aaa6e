//! Route definitions for the `/performers` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::performers;
use crate::state::AppState;

/// Routes mounted at `/performers`.
///
/// ```text
/// GET    /                 -> list_performers
/// POST   /                 -> create_performer
/// GET    /active           -> list_active_performers
/// GET    /archive          -> list_archived_performers
/// PUT    /order            -> reorder_performers
/// GET    /{performer}      -> get_performer (slug or id)
/// PUT    /{performer}      -> update_performer (id)
/// DELETE /{performer}      -> delete_performer (id)
/// ```
///
/// `/order` matches before `/{performer}`, so `GET /order` is 405 rather
/// than a lookup. No slug (always year-prefixed) or id can be `order`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(performers::list_performers).post(performers::create_performer),
        )
        .route("/active", get(performers::list_active_performers))
        .route("/archive", get(performers::list_archived_performers))
        .route("/order", put(performers::reorder_performers))
        .route(
            "/{performer}",
            get(performers::get_performer)
                .put(performers::update_performer)
                .delete(performers::delete_performer),
        )
}
