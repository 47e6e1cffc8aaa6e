use std::str::FromStr;

use festival_core::performer::DEFAULT_FESTIVAL_YEAR;

use crate::auth::jwt::JwtConfig;

/// Credentials of the admin account provisioned at startup.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3002`).
    pub port: u16,
    /// SQLite connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body. Admin forms post base64 images inline.
    pub max_body_bytes: usize,
    /// Edition shown as the current program; earlier years form the archive.
    pub festival_year: i32,
    /// Let the very first login create the admin account.
    pub allow_bootstrap_login: bool,
    /// Admin account to create or reset at startup, if configured.
    pub admin: Option<AdminCredentials>,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `HOST`                  | `0.0.0.0`                     |
    /// | `PORT`                  | `3002`                        |
    /// | `DATABASE_URL`          | `sqlite://festival.db?mode=rwc` |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                          |
    /// | `MAX_BODY_BYTES`        | `52428800` (50 MiB)           |
    /// | `FESTIVAL_YEAR`         | `2026`                        |
    /// | `ALLOW_BOOTSTRAP_LOGIN` | `true`                        |
    /// | `ADMIN_USERNAME`        | unset                         |
    /// | `ADMIN_PASSWORD`        | unset                         |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 3002);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://festival.db?mode=rwc".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30);
        let max_body_bytes: usize = env_parse("MAX_BODY_BYTES", 50 * 1024 * 1024);
        let festival_year: i32 = env_parse("FESTIVAL_YEAR", DEFAULT_FESTIVAL_YEAR);
        let allow_bootstrap_login: bool = env_parse("ALLOW_BOOTSTRAP_LOGIN", true);

        let admin = match (
            std::env::var("ADMIN_USERNAME").ok().filter(|v| !v.trim().is_empty()),
            std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(username), Some(password)) => Some(AdminCredentials {
                username: username.trim().to_string(),
                password,
            }),
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            festival_year,
            allow_bootstrap_login,
            admin,
            jwt,
        }
    }
}

/// Read `key` and parse it, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
