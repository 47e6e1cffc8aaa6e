//! Festival CMS domain logic.
//!
//! Pure functions and types shared by the database and API crates: slugs,
//! collection ordering, typed section content, tickets, the cart calculator
//! and performer rules. Nothing in this crate performs I/O.

pub mod cart;
pub mod error;
pub mod ordering;
pub mod performer;
pub mod section;
pub mod slug;
pub mod ticket;
pub mod types;
