//! Route definitions for the `/sections` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

/// Routes mounted at `/sections`. Sections are created under their page.
///
/// ```text
/// PUT    /{id}   -> update_section
/// DELETE /{id}   -> delete_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(sections::update_section).delete(sections::delete_section),
    )
}
