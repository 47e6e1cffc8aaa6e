//! Repository for the `users` table.

use sqlx::SqlitePool;

use festival_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, password_hash, created_at, updated_at";

/// Provides data access for admin accounts.
pub struct UserRepo;

impl UserRepo {
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.username)
            .bind(&dto.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert `dto` only if the table is empty.
    ///
    /// The emptiness check and the insert are one statement, so two
    /// concurrent first logins cannot both create an account. Returns `None`
    /// when a user already existed.
    pub async fn create_if_none(
        pool: &SqlitePool,
        dto: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash) \
             SELECT $1, $2 WHERE NOT EXISTS (SELECT 1 FROM users) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.username)
            .bind(&dto.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Create the user or reset the password of an existing one.
    pub async fn upsert(pool: &SqlitePool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
             ON CONFLICT (username) DO UPDATE SET \
                 password_hash = excluded.password_hash, \
                 updated_at = CURRENT_TIMESTAMP \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.username)
            .bind(&dto.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if the user existed.
    pub async fn update_password(
        pool: &SqlitePool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
