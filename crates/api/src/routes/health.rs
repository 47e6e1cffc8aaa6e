use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub festival_year: i32,
}

/// GET /health
///
/// Always 200 so a load balancer can tell "up but degraded" from "down".
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match festival_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database unreachable during health check");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        festival_year: state.config.festival_year,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
