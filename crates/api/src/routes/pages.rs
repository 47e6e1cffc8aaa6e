//! Route definitions for the `/pages` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{pages, sections};
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// The path segment is a slug for `GET` and a numeric id for everything
/// else; both share one parameter name so the routes do not conflict.
///
/// ```text
/// GET    /                        -> list_pages
/// POST   /                        -> create_page
/// GET    /{page}                  -> get_page (by slug)
/// PUT    /{page}                  -> update_page (by id)
/// DELETE /{page}                  -> delete_page (by id)
/// POST   /{page}/sections         -> create_section
/// PUT    /{page}/sections/order   -> reorder_sections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route(
            "/{page}",
            get(pages::get_page)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
        .route("/{page}/sections", post(sections::create_section))
        .route("/{page}/sections/order", put(sections::reorder_sections))
}
