//! Performer models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use festival_core::performer::PerformerLinks;
use festival_core::types::{DbId, Timestamp, Version};

use super::{not_blank, nullable};

/// A row from the `performers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub id: DbId,
    /// `{year}-{slugify(name)}`, maintained by the write path.
    pub slug: String,
    pub name: String,
    pub genre: String,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub links: Json<PerformerLinks>,
    pub year: i32,
    pub video_url: Option<String>,
    pub active: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a performer.
///
/// `year` defaults to the configured festival year, `active` to true and
/// `order` to 0.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerformer {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub genre: String,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub links: Option<PerformerLinks>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    pub video_url: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i32>,
}

/// DTO for partially updating a performer.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerformer {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub genre: Option<String>,
    /// `null` removes the photo.
    #[serde(default, deserialize_with = "nullable")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub links: Option<PerformerLinks>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub video_url: Option<Option<String>>,
    pub active: Option<bool>,
    pub order: Option<i32>,
    pub version: Option<Version>,
}
