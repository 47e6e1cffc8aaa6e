pub mod health;
pub mod pages;
pub mod performers;
pub mod sections;
pub mod tickets;
pub mod users;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                   login or first-run bootstrap (public)
///
/// /pages                                   list (public), create
/// /pages/{slug}                            get with sections (public)
/// /pages/{id}                              update, delete
/// /pages/{id}/sections                     create section
/// /pages/{id}/sections/order               reorder sections (PUT)
///
/// /sections/{id}                           update, delete
///
/// /performers                              list (public), create
/// /performers/active                       current program (public)
/// /performers/archive                      earlier editions (public)
/// /performers/order                        reorder (PUT only; GET is 405)
/// /performers/{identifier}                 get by slug or id (public)
/// /performers/{id}                         update, delete
///
/// /tickets                                 list (public), create
/// /tickets/active                          on-sale listing (public)
/// /tickets/order                           reorder (PUT only; GET is 405)
/// /tickets/{id}                            get (public), update, delete
///
/// /users/me/password                       change own password (PUT)
/// ```
///
/// Every non-public route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .nest("/pages", pages::router())
        .nest("/sections", sections::router())
        .nest("/performers", performers::router())
        .nest("/tickets", tickets::router())
        .nest("/users", users::router())
}
