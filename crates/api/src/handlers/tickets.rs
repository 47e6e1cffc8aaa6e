//! Handlers for the `/tickets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festival_core::error::CoreError;
use festival_core::ordering::{next_order, ReorderRequest};
use festival_core::ticket::Price;
use festival_core::types::DbId;
use festival_db::models::ticket::{CreateTicket, UpdateTicket};
use festival_db::repositories::TicketRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{concurrent_write, ensure_version};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/tickets
pub async fn list_tickets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = TicketRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// GET /api/tickets/active
pub async fn list_active_tickets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = TicketRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;
    Ok(Json(DataResponse { data: ticket }))
}

/// POST /api/tickets
///
/// Without an explicit order the ticket is appended after the last one.
pub async fn create_ticket(
    admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTicket>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let order = match input.order {
        Some(order) => order,
        None => next_order(TicketRepo::max_order(&state.pool).await?)?,
    };
    let price_amount = Price::parse_display(&input.price).amount();

    let ticket = TicketRepo::create(&state.pool, &input, order, price_amount).await?;

    tracing::info!(
        ticket_id = ticket.id,
        price_amount,
        ticket_type = %ticket.ticket_type,
        username = %admin.username,
        "Ticket created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// PUT /api/tickets/{id}
pub async fn update_ticket(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;
    ensure_version("Ticket", id, input.version, existing.version)?;

    let price_amount = input
        .price
        .as_deref()
        .map(|price| Price::parse_display(price).amount());

    let ticket = TicketRepo::update(&state.pool, id, existing.version, &input, price_amount)
        .await?
        .ok_or_else(|| concurrent_write("Ticket", id))?;

    tracing::info!(
        ticket_id = id,
        version = ticket.version,
        username = %admin.username,
        "Ticket updated",
    );

    Ok(Json(DataResponse { data: ticket }))
}

/// DELETE /api/tickets/{id}
pub async fn delete_ticket(
    admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TicketRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }));
    }

    tracing::info!(ticket_id = id, username = %admin.username, "Ticket deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/tickets/order
pub async fn reorder_tickets(
    admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let changed = TicketRepo::reorder(&state.pool, &input.items).await?;
    let tickets = TicketRepo::list_all(&state.pool).await?;

    tracing::info!(changed, username = %admin.username, "Tickets reordered");

    Ok(Json(DataResponse { data: tickets }))
}
