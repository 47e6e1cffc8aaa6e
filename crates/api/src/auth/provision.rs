//! Admin account setup that runs before the server accepts requests.

use festival_db::models::user::{CreateUser, User};
use festival_db::repositories::UserRepo;
use festival_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminCredentials;
use crate::error::{AppError, AppResult};

/// Create the configured admin account, or reset its password if it exists.
pub async fn provision_admin(pool: &DbPool, admin: &AdminCredentials) -> AppResult<User> {
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::upsert(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin account provisioned");
    Ok(user)
}
