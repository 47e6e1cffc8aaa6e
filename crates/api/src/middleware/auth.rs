//! The `AuthUser` extractor guarding every admin mutation.
//!
//! Each request carries its own `Authorization: Bearer <token>` header;
//! nothing about the session lives on the server.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use festival_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The admin a request was signed by.
///
/// No header, or a scheme other than Bearer, is 401. A token with a bad
/// signature or past its expiry is 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        match validate_token(token, &state.config.jwt) {
            Ok(claims) => Ok(AuthUser { username: claims.sub }),
            Err(err) => {
                tracing::debug!(error = %err, path = %parts.uri.path(), "Bearer token refused");
                Err(CoreError::Forbidden("Invalid or expired token".into()).into())
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, CoreError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Err(CoreError::Unauthorized("Login required".into()));
    };
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Expected 'Authorization: Bearer <token>'".into()))
}
