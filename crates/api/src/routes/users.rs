//! Route definitions for the `/users` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /me/password   -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me/password", put(users::change_password))
}
