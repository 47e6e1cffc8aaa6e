//! Ticket models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use festival_core::cart::CartTicket;
use festival_core::ticket::{Price, TicketType};
use festival_core::types::{DbId, Timestamp, Version};

use super::{not_blank, nullable};

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    /// Display string, e.g. `"350 Kč"`.
    pub price: String,
    /// Numeric value parsed from `price` on every write.
    pub price_amount: i64,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub button_text: Option<String>,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub active: bool,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Ticket> for CartTicket {
    fn from(ticket: &Ticket) -> Self {
        CartTicket {
            id: ticket.id,
            title: ticket.title.clone(),
            price: Price(ticket.price_amount),
            ticket_type: ticket.ticket_type,
        }
    }
}

/// DTO for creating a ticket tier.
///
/// `type` defaults to `active`, `active` to true, and `order` appends after
/// the last ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub price: String,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub button_text: Option<String>,
    #[serde(rename = "type")]
    pub ticket_type: Option<TicketType>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// DTO for partially updating a ticket tier.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub badge: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub features: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub button_text: Option<Option<String>>,
    #[serde(rename = "type")]
    pub ticket_type: Option<TicketType>,
    pub order: Option<i32>,
    pub active: Option<bool>,
    pub version: Option<Version>,
}
