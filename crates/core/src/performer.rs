//! Performer catalog rules: social links, festival year, and the
//! slug-or-id identifier used by public performer URLs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::slug::is_slug_shaped;
use crate::types::DbId;

/// Festival edition shown in the current program when not configured.
pub const DEFAULT_FESTIVAL_YEAR: i32 = 2026;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

/// Named social profile URLs of a performer. Every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformerLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub soundcloud: Option<String>,
    pub website: Option<String>,
    pub youtube: Option<String>,
}

impl PerformerLinks {
    /// Blank strings (what an untouched admin form submits) become `None`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            facebook: clean(self.facebook),
            instagram: clean(self.instagram),
            soundcloud: clean(self.soundcloud),
            website: clean(self.website),
            youtube: clean(self.youtube),
        }
    }
}

/// One way of resolving a public performer identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformerLookup {
    Slug(String),
    Id(DbId),
}

impl PerformerLookup {
    /// Lookups to attempt for `identifier`, in priority order.
    ///
    /// A slug-shaped identifier is tried as a slug first; a numeric one is
    /// then tried as an id. Anything else yields no candidates.
    pub fn candidates(identifier: &str) -> Vec<PerformerLookup> {
        let mut out = Vec::with_capacity(2);
        if is_slug_shaped(identifier) {
            out.push(Self::Slug(identifier.to_string()));
        }
        if let Ok(id) = identifier.parse::<DbId>() {
            if id > 0 {
                out.push(Self::Id(id));
            }
        }
        out
    }
}
