//! Page models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use festival_core::types::{DbId, Timestamp, Version};

use super::not_blank;
use super::section::Section;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Page listing entry with the number of sections it holds.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub page: Page,
    pub section_count: i64,
}

/// A page with its sections in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PageWithSections {
    #[serde(flatten)]
    pub page: Page,
    pub sections: Vec<Section>,
}

/// DTO for creating a page. The slug is derived from the title when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePage {
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
}

/// DTO for partially updating a page. The slug is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePage {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<Version>,
}
