//! Handlers for the `/pages` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festival_core::error::CoreError;
use festival_core::slug::{slugify, validate_page_slug};
use festival_core::types::DbId;
use festival_db::models::page::{CreatePage, PageWithSections, UpdatePage};
use festival_db::repositories::{PageRepo, SectionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{concurrent_write, ensure_version};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/pages
pub async fn list_pages(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pages = PageRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/pages/{slug}
///
/// The page with its sections in display order.
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "Page",
            key: slug,
        }))?;
    let sections = SectionRepo::list_for_page(&state.pool, page.id).await?;

    Ok(Json(DataResponse {
        data: PageWithSections { page, sections },
    }))
}

/// POST /api/pages
///
/// An explicit slug must already be canonical; otherwise the slug is derived
/// from the title. A taken slug is a 409.
pub async fn create_page(
    admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let slug = match input.slug.as_deref().map(str::trim) {
        Some(explicit) => {
            validate_page_slug(explicit)?;
            explicit.to_string()
        }
        None => {
            let derived = slugify(&input.title);
            if derived.is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "Title must contain a letter or digit to derive a slug".into(),
                )));
            }
            derived
        }
    };

    let page = PageRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(page_id = page.id, slug = %page.slug, username = %admin.username, "Page created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PUT /api/pages/{id}
pub async fn update_page(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    ensure_version("Page", id, input.version, existing.version)?;

    let page = PageRepo::update(&state.pool, id, existing.version, &input)
        .await?
        .ok_or_else(|| concurrent_write("Page", id))?;

    tracing::info!(page_id = id, version = page.version, username = %admin.username, "Page updated");

    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/pages/{id}
///
/// Removes the page and all of its sections.
pub async fn delete_page(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Page", id }));
    }

    tracing::info!(page_id = id, username = %admin.username, "Page deleted");
    Ok(StatusCode::NO_CONTENT)
}
