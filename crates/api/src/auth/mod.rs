//! Authentication and authorization primitives.
//!
//! - [`password`]: Argon2id password hashing and verification.
//! - [`jwt`]: JWT access-token generation and validation.
//! - [`provision`]: Startup creation of the configured admin account.

pub mod jwt;
pub mod password;
pub mod provision;
