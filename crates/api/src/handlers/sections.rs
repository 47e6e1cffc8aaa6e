//! Handlers for page sections.
//!
//! Section payloads are checked against the declared type before they are
//! written; a payload that does not fit its type is a 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use festival_core::error::CoreError;
use festival_core::ordering::{next_order, ReorderRequest};
use festival_core::section::{SectionContent, SectionKind};
use festival_core::types::DbId;
use festival_db::models::section::{CreateSection, Section, UpdateSection};
use festival_db::repositories::{PageRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{concurrent_write, ensure_version};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/pages/{page_id}/sections
///
/// Omitted content becomes the type's default payload; omitted order
/// appends after the last section.
pub async fn create_section(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateSection>,
) -> AppResult<impl IntoResponse> {
    ensure_page_exists(&state, page_id).await?;

    let body = match input.content {
        Some(content) => SectionContent::from_parts(input.kind, content)?,
        None => SectionContent::default_for(input.kind, Local::now().date_naive()),
    };
    let order = match input.order {
        Some(order) => order,
        None => next_order(SectionRepo::max_order(&state.pool, page_id).await?)?,
    };

    let section = SectionRepo::create(&state.pool, page_id, &body, order).await?;

    tracing::info!(
        section_id = section.id,
        page_id,
        section_type = %body.kind(),
        username = %admin.username,
        "Section created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// PUT /api/sections/{id}
pub async fn update_section(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<impl IntoResponse> {
    let existing = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }))?;
    ensure_version("Section", id, input.version, existing.version)?;

    let expected_version = existing.version;
    let order = input.order.unwrap_or(existing.sort_order);
    let body = merge_body(existing, input.kind, input.content)?;

    let section = SectionRepo::update(&state.pool, id, expected_version, &body, order)
        .await?
        .ok_or_else(|| concurrent_write("Section", id))?;

    tracing::info!(
        section_id = id,
        version = section.version,
        username = %admin.username,
        "Section updated",
    );

    Ok(Json(DataResponse { data: section }))
}

/// DELETE /api/sections/{id}
pub async fn delete_section(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SectionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }));
    }

    tracing::info!(section_id = id, username = %admin.username, "Section deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/pages/{page_id}/sections/order
///
/// Body lists every section of the page in its new order. Responds with the
/// page's sections as stored after the reorder.
pub async fn reorder_sections(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_page_exists(&state, page_id).await?;

    let changed = SectionRepo::reorder(&state.pool, page_id, &input.items).await?;
    let sections = SectionRepo::list_for_page(&state.pool, page_id).await?;

    tracing::info!(page_id, changed, username = %admin.username, "Sections reordered");

    Ok(Json(DataResponse { data: sections }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_page_exists(state: &AppState, page_id: DbId) -> AppResult<()> {
    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;
    Ok(())
}

/// Resolve the payload a section update should store.
///
/// New content is checked against the new type (or the current one). A type
/// change without content resets to the new type's default; otherwise the
/// stored payload is kept.
fn merge_body(
    existing: Section,
    kind: Option<SectionKind>,
    content: Option<serde_json::Value>,
) -> AppResult<SectionContent> {
    let current_kind = existing.body.kind();
    let body = match (kind, content) {
        (kind, Some(content)) => SectionContent::from_parts(kind.unwrap_or(current_kind), content)?,
        (Some(kind), None) if kind != current_kind => {
            SectionContent::default_for(kind, Local::now().date_naive())
        }
        (_, None) => existing.body,
    };
    Ok(body)
}
