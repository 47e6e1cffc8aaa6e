//! Section models and DTOs.
//!
//! A section row stores its kind in `section_type` and its payload as JSON
//! text in `content`. Rows are decoded straight into the typed
//! [`SectionContent`], so a section that leaves the database has already
//! been checked against its kind's schema.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};

use festival_core::section::{SectionContent, SectionKind};
use festival_core::types::{DbId, Timestamp, Version};

/// A row from the `sections` table.
///
/// Serializes as `{id, pageId, type, content, order, version, ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: DbId,
    pub page_id: DbId,
    #[serde(flatten)]
    pub body: SectionContent,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'r> FromRow<'r, SqliteRow> for Section {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("section_type")?;
        let Json(content): Json<serde_json::Value> = row.try_get("content")?;

        let body = kind
            .parse::<SectionKind>()
            .and_then(|kind| SectionContent::from_parts(kind, content))
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "content".into(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            page_id: row.try_get("page_id")?,
            body,
            sort_order: row.try_get("sort_order")?,
            version: row.try_get("version")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// DTO for adding a section to a page.
///
/// Omitted `content` becomes the kind's default payload; omitted `order`
/// appends after the page's last section.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub content: Option<serde_json::Value>,
    pub order: Option<i32>,
}

/// DTO for partially updating a section.
///
/// Changing `type` without sending `content` resets the payload to the new
/// kind's default.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    #[serde(rename = "type")]
    pub kind: Option<SectionKind>,
    pub content: Option<serde_json::Value>,
    pub order: Option<i32>,
    pub version: Option<Version>,
}
