//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches. Nullable
//!   columns use `Option<Option<T>>` so `null` clears and an absent key keeps
//!
//! Entities serialize with camelCase keys; `sort_order` columns are exposed
//! as `order`.

pub mod page;
pub mod performer;
pub mod section;
pub mod ticket;
pub mod user;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Reject strings that are empty after trimming.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Deserialize a present key into `Some`, so `null` becomes `Some(None)`.
///
/// Pair with `#[serde(default)]`: an absent key stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        photo: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"photo":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"photo":"a.png"}"#).unwrap();

        assert_eq!(absent.photo, None);
        assert_eq!(null.photo, Some(None));
        assert_eq!(value.photo, Some(Some("a.png".to_string())));
    }
}
