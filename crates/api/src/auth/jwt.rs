//! Bearer tokens handed out by `POST /api/login`.
//!
//! HS256 with the admin's username in `sub`. There is no refresh flow:
//! once a token expires the admin logs in again.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const DEFAULT_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the admin.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn issue(username: &str, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            sub: username.to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_EXPIRY_DAYS` (default 7).
    ///
    /// # Panics
    ///
    /// When the secret is missing or blank, or the expiry is not a positive
    /// number of days.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let expiry_days = match std::env::var("JWT_EXPIRY_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .unwrap_or_else(|| panic!("JWT_EXPIRY_DAYS must be a positive integer, got '{raw}'")),
            Err(_) => DEFAULT_EXPIRY_DAYS,
        };

        Self { secret, expiry_days }
    }

    pub fn lifetime(&self) -> Duration {
        Duration::days(self.expiry_days)
    }

    /// Lifetime reported to the client as `expiresIn`.
    pub fn expires_in_secs(&self) -> i64 {
        self.lifetime().num_seconds()
    }
}

/// Sign a token for `username` valid for the configured lifetime.
pub fn generate_access_token(
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(username, Utc::now(), config.lifetime());
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry and return the claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_days: 7,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn token_carries_username_and_lifetime() {
        let cfg = config("festival-secret");
        let token = generate_access_token("pokladna", &cfg).unwrap();
        let claims = validate_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, "pokladna");
        assert_eq!(claims.exp - claims.iat, cfg.expires_in_secs());
        assert_eq!(cfg.expires_in_secs(), 604_800);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default leeway of one minute.
        let issued = Utc::now() - Duration::days(8);
        let claims = Claims::issue("admin", issued, Duration::days(7));
        let token = sign(&claims, "festival-secret");

        assert!(validate_token(&token, &config("festival-secret")).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = generate_access_token("admin", &config("one-secret")).unwrap();
        assert!(validate_token(&token, &config("another-secret")).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(validate_token("not.a.jwt", &config("festival-secret")).is_err());
    }
}
