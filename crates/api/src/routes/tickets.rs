//! Route definitions for the `/tickets` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET    /          -> list_tickets
/// POST   /          -> create_ticket
/// GET    /active    -> list_active_tickets
/// PUT    /order     -> reorder_tickets
/// GET    /{id}      -> get_ticket
/// PUT    /{id}      -> update_ticket
/// DELETE /{id}      -> delete_ticket
/// ```
///
/// `GET /order` is 405: the static segment wins over `/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route("/active", get(tickets::list_active_tickets))
        .route("/order", put(tickets::reorder_tickets))
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
}
