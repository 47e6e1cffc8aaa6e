//! Handlers for the `/performers` resource.
//!
//! The slug is always recomputed from the final year and name, so a rename or
//! a move to another edition changes the public URL.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festival_core::error::CoreError;
use festival_core::ordering::ReorderRequest;
use festival_core::performer::{validate_year, PerformerLookup};
use festival_core::slug::{performer_slug, slugify};
use festival_core::types::DbId;
use festival_db::models::performer::{CreatePerformer, Performer, UpdatePerformer};
use festival_db::repositories::PerformerRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{concurrent_write, ensure_version};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/performers
pub async fn list_performers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let performers = PerformerRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: performers }))
}

/// GET /api/performers/active
///
/// Current program: active performers of the configured festival year.
pub async fn list_active_performers(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let performers = PerformerRepo::list_program(&state.pool, state.config.festival_year).await?;
    Ok(Json(DataResponse { data: performers }))
}

/// GET /api/performers/archive
///
/// Active performers of earlier editions, newest year first.
pub async fn list_archived_performers(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let performers = PerformerRepo::list_archive(&state.pool, state.config.festival_year).await?;
    Ok(Json(DataResponse { data: performers }))
}

/// GET /api/performers/{identifier}
///
/// The identifier is tried as a slug first, then as a numeric id.
pub async fn get_performer(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<impl IntoResponse> {
    for lookup in PerformerLookup::candidates(&identifier) {
        let found = match &lookup {
            PerformerLookup::Slug(slug) => PerformerRepo::find_by_slug(&state.pool, slug).await?,
            PerformerLookup::Id(id) => PerformerRepo::find_by_id(&state.pool, *id).await?,
        };
        if let Some(performer) = found {
            return Ok(Json(DataResponse { data: performer }));
        }
    }

    Err(AppError::Core(CoreError::NotFoundByKey {
        entity: "Performer",
        key: identifier,
    }))
}

/// POST /api/performers
pub async fn create_performer(
    admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePerformer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let year = input.year.unwrap_or(state.config.festival_year);
    let slug = resolve_slug(year, &input.name)?;

    let performer = PerformerRepo::create(&state.pool, &input, &slug, year).await?;

    tracing::info!(
        performer_id = performer.id,
        slug = %performer.slug,
        username = %admin.username,
        "Performer created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: performer })))
}

/// PUT /api/performers/{id}
pub async fn update_performer(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerformer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = find_existing(&state, id).await?;
    ensure_version("Performer", id, input.version, existing.version)?;

    let name = input.name.as_deref().unwrap_or(&existing.name);
    let year = input.year.unwrap_or(existing.year);
    let slug = resolve_slug(year, name)?;

    let performer =
        PerformerRepo::update(&state.pool, id, existing.version, &input, &slug, year)
            .await?
            .ok_or_else(|| concurrent_write("Performer", id))?;

    if performer.slug != existing.slug {
        tracing::info!(performer_id = id, old_slug = %existing.slug, slug = %performer.slug, "Performer slug changed");
    }
    tracing::info!(
        performer_id = id,
        version = performer.version,
        username = %admin.username,
        "Performer updated",
    );

    Ok(Json(DataResponse { data: performer }))
}

/// DELETE /api/performers/{id}
pub async fn delete_performer(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PerformerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Performer",
            id,
        }));
    }

    tracing::info!(performer_id = id, username = %admin.username, "Performer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/performers/order
pub async fn reorder_performers(
    admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let changed = PerformerRepo::reorder(&state.pool, &input.items).await?;
    let performers = PerformerRepo::list_all(&state.pool).await?;

    tracing::info!(changed, username = %admin.username, "Performers reordered");

    Ok(Json(DataResponse { data: performers }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_existing(state: &AppState, id: DbId) -> AppResult<Performer> {
    PerformerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Performer",
            id,
        }))
}

/// Check the year and build the `{year}-{name}` slug.
fn resolve_slug(year: i32, name: &str) -> AppResult<String> {
    validate_year(year)?;
    if slugify(name).is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must contain a letter or digit".into(),
        )));
    }
    Ok(performer_slug(year, name))
}
