//! Admin password storage: Argon2id PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use festival_core::error::CoreError;

/// Shortest password accepted by the password-change endpoint.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(false)` for a wrong password; `Err` only when `stored` is not a
/// readable hash.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Length is counted in characters, so accented passwords are not penalized.
pub fn validate_password_strength(plain: &str, min_length: usize) -> Result<(), CoreError> {
    if plain.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "New password needs at least {min_length} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn stored_hash_verifies_only_the_original() {
        let stored = hash_password("festival-2026").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("festival-2026", &stored).unwrap());
        assert!(!verify_password("festival-2025", &stored).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("pokladna").unwrap(), hash_password("pokladna").unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("anything", "plaintext-in-db").is_err());
    }

    #[test]
    fn length_boundary_counts_characters() {
        assert_matches!(
            validate_password_strength("krátké", MIN_PASSWORD_LENGTH),
            Err(CoreError::Validation(_))
        );
        assert!(validate_password_strength("žluťoučk", MIN_PASSWORD_LENGTH).is_ok());
    }
}
