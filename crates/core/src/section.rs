//! Typed content blocks that make up a page.
//!
//! A section's `type` tag selects exactly one payload shape. The payload is
//! persisted as JSON next to the tag; [`SectionContent::from_parts`] is the
//! single place where a (tag, JSON) pair is checked against the shape the tag
//! expects, so editing and rendering can match exhaustively on the enum.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Section kind (the `type` tag)
// ---------------------------------------------------------------------------

/// The fixed vocabulary of section types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "hero")]
    Hero,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "gallery")]
    Gallery,
    #[serde(rename = "blog-post")]
    BlogPost,
    #[serde(rename = "text-block")]
    TextBlock,
    #[serde(rename = "cards-2col")]
    Cards2Col,
    #[serde(rename = "cards-3col")]
    Cards3Col,
    #[serde(rename = "highlight-box")]
    HighlightBox,
    #[serde(rename = "icon-list")]
    IconList,
    #[serde(rename = "info-hub")]
    InfoHub,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        Self::Hero,
        Self::Content,
        Self::Gallery,
        Self::BlogPost,
        Self::TextBlock,
        Self::Cards2Col,
        Self::Cards3Col,
        Self::HighlightBox,
        Self::IconList,
        Self::InfoHub,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Content => "content",
            Self::Gallery => "gallery",
            Self::BlogPost => "blog-post",
            Self::TextBlock => "text-block",
            Self::Cards2Col => "cards-2col",
            Self::Cards3Col => "cards-3col",
            Self::HighlightBox => "highlight-box",
            Self::IconList => "icon-list",
            Self::InfoHub => "info-hub",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown section type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta_primary: String,
    #[serde(default)]
    pub cta_secondary: String,
    /// Opaque image reference (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

/// Plain title + text block (`content` type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextContent {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GalleryContent {
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlogPostContent {
    pub title: String,
    /// Display date, free-form (e.g. `"16. 10. 2026"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextBlockContent {
    pub lead: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardsContent {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HighlightBoxContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconListItem {
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconListContent {
    pub items: Vec<IconListItem>,
}

/// One tile of the info hub, linking to an info sub-page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InfoHubItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InfoHubContent {
    pub items: Vec<InfoHubItem>,
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// Section payload, tagged by its type.
///
/// Serializes as `{ "type": "<kind>", "content": { ... } }`, which is
/// flattened into the section's wire representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum SectionContent {
    #[serde(rename = "hero")]
    Hero(HeroContent),
    #[serde(rename = "content")]
    Content(TextContent),
    #[serde(rename = "gallery")]
    Gallery(GalleryContent),
    #[serde(rename = "blog-post")]
    BlogPost(BlogPostContent),
    #[serde(rename = "text-block")]
    TextBlock(TextBlockContent),
    #[serde(rename = "cards-2col")]
    Cards2Col(CardsContent),
    #[serde(rename = "cards-3col")]
    Cards3Col(CardsContent),
    #[serde(rename = "highlight-box")]
    HighlightBox(HighlightBoxContent),
    #[serde(rename = "icon-list")]
    IconList(IconListContent),
    #[serde(rename = "info-hub")]
    InfoHub(InfoHubContent),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Hero(_) => SectionKind::Hero,
            Self::Content(_) => SectionKind::Content,
            Self::Gallery(_) => SectionKind::Gallery,
            Self::BlogPost(_) => SectionKind::BlogPost,
            Self::TextBlock(_) => SectionKind::TextBlock,
            Self::Cards2Col(_) => SectionKind::Cards2Col,
            Self::Cards3Col(_) => SectionKind::Cards3Col,
            Self::HighlightBox(_) => SectionKind::HighlightBox,
            Self::IconList(_) => SectionKind::IconList,
            Self::InfoHub(_) => SectionKind::InfoHub,
        }
    }

    /// Check a raw JSON payload against the shape `kind` expects.
    pub fn from_parts(kind: SectionKind, content: serde_json::Value) -> Result<Self, CoreError> {
        let tagged = serde_json::json!({ "type": kind.as_str(), "content": content });
        serde_json::from_value(tagged).map_err(|e| {
            CoreError::Validation(format!("Content does not match section type '{kind}': {e}"))
        })
    }

    /// The untagged payload, as stored in the `content` column.
    pub fn payload(&self) -> serde_json::Value {
        let result = match self {
            Self::Hero(c) => serde_json::to_value(c),
            Self::Content(c) => serde_json::to_value(c),
            Self::Gallery(c) => serde_json::to_value(c),
            Self::BlogPost(c) => serde_json::to_value(c),
            Self::TextBlock(c) => serde_json::to_value(c),
            Self::Cards2Col(c) | Self::Cards3Col(c) => serde_json::to_value(c),
            Self::HighlightBox(c) => serde_json::to_value(c),
            Self::IconList(c) => serde_json::to_value(c),
            Self::InfoHub(c) => serde_json::to_value(c),
        };
        // Plain structs of strings, vecs and ints always serialize.
        result.unwrap_or(serde_json::Value::Null)
    }

    /// Initial payload for a freshly created section of `kind`.
    ///
    /// Hero, content, gallery and blog post start with a placeholder title.
    /// The structured kinds start empty in their own shape, never with a
    /// title/text pair they would not accept.
    pub fn default_for(kind: SectionKind, today: NaiveDate) -> Self {
        match kind {
            SectionKind::Hero => Self::Hero(HeroContent {
                title: "Festival 2026".into(),
                subtitle: None,
                description: String::new(),
                cta_primary: String::new(),
                cta_secondary: String::new(),
                background_image: None,
            }),
            SectionKind::Content => Self::Content(TextContent {
                title: "New Section".into(),
                text: String::new(),
            }),
            SectionKind::Gallery => Self::Gallery(GalleryContent {
                title: "Gallery Title".into(),
                images: Vec::new(),
            }),
            SectionKind::BlogPost => Self::BlogPost(BlogPostContent {
                title: "New Post".into(),
                date: Some(today.format("%-d. %-m. %Y").to_string()),
                text: String::new(),
            }),
            SectionKind::TextBlock => Self::TextBlock(TextBlockContent {
                lead: String::new(),
            }),
            SectionKind::Cards2Col => Self::Cards2Col(CardsContent { cards: Vec::new() }),
            SectionKind::Cards3Col => Self::Cards3Col(CardsContent { cards: Vec::new() }),
            SectionKind::HighlightBox => Self::HighlightBox(HighlightBoxContent {
                text: String::new(),
            }),
            SectionKind::IconList => Self::IconList(IconListContent { items: Vec::new() }),
            SectionKind::InfoHub => Self::InfoHub(InfoHubContent { items: Vec::new() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 5).unwrap()
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.as_str().parse::<SectionKind>().unwrap(), kind);
        }
        assert!("carousel".parse::<SectionKind>().is_err());
    }

    #[test]
    fn serde_tag_matches_as_str() {
        for kind in SectionKind::ALL {
            let tag = serde_json::to_value(kind).unwrap();
            assert_eq!(tag, json!(kind.as_str()));
        }
    }

    #[test]
    fn defaults_match_their_kind() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionContent::default_for(kind, today()).kind(), kind);
        }
    }

    #[test]
    fn structured_defaults_are_empty_in_their_own_shape() {
        let payload = |kind| SectionContent::default_for(kind, today()).payload();
        assert_eq!(payload(SectionKind::TextBlock), json!({ "lead": "" }));
        assert_eq!(payload(SectionKind::Cards3Col), json!({ "cards": [] }));
        assert_eq!(payload(SectionKind::HighlightBox), json!({ "text": "" }));
        assert_eq!(payload(SectionKind::Content), json!({ "title": "New Section", "text": "" }));
    }

    #[test]
    fn blog_post_default_carries_date() {
        let content = SectionContent::default_for(SectionKind::BlogPost, today());
        assert_matches!(content, SectionContent::BlogPost(BlogPostContent { date: Some(ref d), .. }) if d == "5. 6. 2026");
    }

    #[test]
    fn hero_payload_parses_camel_case() {
        let content = SectionContent::from_parts(
            SectionKind::Hero,
            json!({
                "title": "Festival 2026",
                "subtitle": "Prague, 2026",
                "description": "Experience the Art of Culture",
                "ctaPrimary": "Tickets",
                "ctaSecondary": "Explore"
            }),
        )
        .unwrap();
        assert_matches!(content, SectionContent::Hero(ref hero) if hero.cta_primary == "Tickets");
    }

    #[test]
    fn payload_of_wrong_shape_is_rejected() {
        // Hero fields under a gallery tag.
        let result = SectionContent::from_parts(
            SectionKind::Gallery,
            json!({ "title": "x", "ctaPrimary": "Tickets" }),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = SectionContent::from_parts(SectionKind::HighlightBox, json!({}));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn payload_round_trips() {
        let original = SectionContent::from_parts(
            SectionKind::Cards3Col,
            json!({ "cards": [{ "title": "Bar", "text": "Plzeň", "accent": "pink", "icon": "Beer" }] }),
        )
        .unwrap();
        let again = SectionContent::from_parts(original.kind(), original.payload()).unwrap();
        assert_eq!(original, again);
    }

    #[test]
    fn wire_format_is_adjacently_tagged() {
        let content = SectionContent::default_for(SectionKind::HighlightBox, today());
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({ "type": "highlight-box", "content": { "text": "" } })
        );
    }
}
