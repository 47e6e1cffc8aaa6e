//! Client-held shopping cart and checkout form for tickets.
//!
//! Nothing here touches the store: the cart is built from ticket snapshots
//! the client already fetched, and checkout stops at a validated summary.
//! Payment is not part of this crate.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ticket::{Price, TicketType};
use crate::types::DbId;

/// Snapshot of the ticket fields the cart needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTicket {
    pub id: DbId,
    pub title: String,
    pub price: Price,
    pub ticket_type: TicketType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub ticket: CartTicket,
    pub quantity: u32,
}

impl CartLine {
    pub fn total(&self) -> Price {
        self.ticket.price.times(self.quantity)
    }
}

/// Ordered list of cart lines, at most one line per ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `ticket`. A ticket already in the cart gets its
    /// quantity bumped instead of a second line.
    pub fn add_item(&mut self, ticket: CartTicket) -> Result<(), CoreError> {
        if !ticket.ticket_type.is_purchasable() {
            return Err(CoreError::Validation(format!(
                "Ticket '{}' is not on sale ({})",
                ticket.title, ticket.ticket_type
            )));
        }
        match self.lines.iter_mut().find(|l| l.ticket.id == ticket.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                ticket,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Set the quantity of an existing line, clamped to at least 1.
    ///
    /// Unknown ticket ids are ignored; removing a line is [`Cart::remove_item`].
    pub fn set_quantity(&mut self, ticket_id: DbId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.ticket.id == ticket_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove the line for `ticket_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, ticket_id: DbId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.ticket.id != ticket_id);
        self.lines.len() != before
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines. No tax or discounts.
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::total).sum()
    }
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// Buyer details collected before payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub surname: String,
    pub address: String,
    /// Agreement with the business terms.
    pub consent: bool,
}

impl CheckoutForm {
    /// All fields are required and consent must be given.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("email", &self.email),
            ("phone", &self.phone),
            ("name", &self.name),
            ("surname", &self.surname),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if !self.consent {
            missing.push("consent");
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required checkout fields: {}",
                missing.join(", ")
            )));
        }

        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(CoreError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        Ok(())
    }
}

/// A cart and buyer that passed every pre-payment check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub buyer: CheckoutForm,
}

/// Validate a cart and buyer details and produce the order summary that a
/// payment step would consume.
pub fn prepare_checkout(cart: &Cart, form: CheckoutForm) -> Result<CheckoutSummary, CoreError> {
    if cart.is_empty() {
        return Err(CoreError::Validation("Cart is empty".into()));
    }
    form.validate()?;
    Ok(CheckoutSummary {
        lines: cart.lines().to_vec(),
        total: cart.total(),
        buyer: form,
    })
}
