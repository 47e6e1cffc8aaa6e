//! Request extractors that guard mutating endpoints.
//!
//! - [`auth::AuthUser`]: Resolves the caller from a JWT Bearer token.

pub mod auth;
