//! Handler for `POST /login`.
//!
//! Login doubles as first-run setup: while no account exists, and bootstrap
//! is enabled, the first credentials submitted become the admin account.

use axum::extract::State;
use axum::Json;
use festival_core::error::CoreError;
use festival_db::models::user::{CreateUser, User, UserResponse};
use festival_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login: a bearer token and the account it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/login
///
/// Authenticate with username + password and return a bearer token. Unknown
/// usernames and wrong passwords fail identically with 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input.validate()?;
    let username = input.username.trim();

    let user = match UserRepo::find_by_username(&state.pool, username).await? {
        Some(user) => {
            let password_valid = verify_password(&input.password, &user.password_hash)
                .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
            if !password_valid {
                tracing::info!(username, "Login rejected");
                return Err(invalid_credentials());
            }
            user
        }
        None => bootstrap_account(&state, username, &input.password).await?,
    };

    let token = generate_access_token(&user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "Login succeeded");

    Ok(Json(DataResponse {
        data: LoginResponse {
            token,
            expires_in: state.config.jwt.expires_in_secs(),
            user: UserResponse::from(&user),
        },
    }))
}

/// Create the first account from the submitted credentials.
///
/// Fails with the generic invalid-credentials error when bootstrap is
/// disabled or any account already exists.
async fn bootstrap_account(state: &AppState, username: &str, password: &str) -> AppResult<User> {
    if !state.config.allow_bootstrap_login || UserRepo::count(&state.pool).await? > 0 {
        tracing::info!(username, "Login rejected");
        return Err(invalid_credentials());
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let dto = CreateUser {
        username: username.to_string(),
        password_hash,
    };

    // Another first login may have won the race since the count above.
    let user = UserRepo::create_if_none(&state.pool, &dto)
        .await?
        .ok_or_else(invalid_credentials)?;

    tracing::warn!(user_id = user.id, username = %user.username, "Bootstrap admin account created");
    Ok(user)
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}
