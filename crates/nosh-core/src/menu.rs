//! # Menu Builder Schema
//!
//! The data model a restaurant owner composes in the builder and
//! round-trips to the remote API as a single JSON document.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BuilderSchema                                    │
//! │                                                                         │
//! │  header: [ {type:"heading", heading:"…"} | {type:"text", text:"…"} ]   │
//! │                                                                         │
//! │  menu:                                                                  │
//! │    ┌───────────────────────────────────────────────────────────────┐   │
//! │    │ MenuGroup { name, timeFrom, timeTo }                          │   │
//! │    │   items:                                                      │   │
//! │    │     ┌─────────────────────────────────────────────────────┐   │   │
//! │    │     │ { version:"v1", id, name, description?, price,      │   │   │
//! │    │     │   ingredients?, categories?, image? }               │   │   │
//! │    │     └─────────────────────────────────────────────────────┘   │   │
//! │    └───────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Group order and item order are meaningful and preserved across edits  │
//! │  and persistence. Dish ids are unique across the WHOLE schema.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Version Tagging
//! Menu items carry a `version` tag. A recognized tag (`v1`) deserializes to
//! the typed [`MenuItemV1`]; anything else is kept as an opaque JSON value so
//! it survives a load/save round trip unchanged. Renderers skip unsupported
//! entries instead of erroring.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::Price;

// =============================================================================
// Header Blocks
// =============================================================================

/// A block in the menu header, tagged on `type`.
///
/// Closed sum type: rendering matches exhaustively, so a new block kind is a
/// compile error at every render site rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HeaderBlock {
    /// Free-form paragraph text.
    Text { text: String },

    /// A heading line.
    Heading { heading: String },
}

// =============================================================================
// Blob Image
// =============================================================================

/// An uploaded image reference as stored by the blob service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BlobImage {
    /// Public URL of the blob.
    pub url: String,

    /// Path inside the blob store, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,

    /// MIME type, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

// =============================================================================
// Menu Items
// =============================================================================

/// The recognized menu item version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemVersion {
    #[serde(rename = "v1")]
    V1,
}

/// A version-1 menu item: a dish the diner can order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemV1 {
    /// Version tag; always `"v1"` for this shape.
    pub version: ItemVersion,

    /// Dish identity, unique across the whole schema. Used as the list key
    /// in the builder and for direct lookup from dish cards.
    pub id: String,

    /// Dish name shown on the card.
    pub name: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price as `{amount, currency}`.
    pub price: Price,

    /// Ingredient tags (set-like; duplicates are harmless but pointless).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,

    /// Category tags (e.g. "vegan", "spicy").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Attached images. The builder allows at most one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image: Vec<BlobImage>,
}

/// A menu item entry as stored in the document.
///
/// Deserialization first tries the typed v1 shape; any entry that does not
/// match (unknown `version`, missing tag) is preserved verbatim as
/// [`MenuItem::Unsupported`]. Such entries are unrenderable and skipped
/// everywhere, but they round-trip through persistence untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuItem {
    V1(MenuItemV1),
    Unsupported(Value),
}

impl MenuItem {
    /// Returns the typed item if this entry is renderable.
    pub fn as_v1(&self) -> Option<&MenuItemV1> {
        match self {
            MenuItem::V1(item) => Some(item),
            MenuItem::Unsupported(_) => None,
        }
    }

    /// Mutable access to the typed item, if renderable.
    pub fn as_v1_mut(&mut self) -> Option<&mut MenuItemV1> {
        match self {
            MenuItem::V1(item) => Some(item),
            MenuItem::Unsupported(_) => None,
        }
    }

    /// Whether this entry has a recognized version tag.
    pub fn is_renderable(&self) -> bool {
        matches!(self, MenuItem::V1(_))
    }
}

impl From<MenuItemV1> for MenuItem {
    fn from(item: MenuItemV1) -> Self {
        MenuItem::V1(item)
    }
}

// =============================================================================
// Menu Groups
// =============================================================================

/// An ordered group of dishes served during a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGroup {
    /// Group name, e.g. "Lunch Specials".
    pub name: String,

    /// Start of the serving window, "HH:MM".
    pub time_from: String,

    /// End of the serving window, "HH:MM".
    pub time_to: String,

    /// Dishes in this group, in display order.
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    /// Creates an empty group.
    pub fn new(
        name: impl Into<String>,
        time_from: impl Into<String>,
        time_to: impl Into<String>,
    ) -> Self {
        MenuGroup {
            name: name.into(),
            time_from: time_from.into(),
            time_to: time_to.into(),
            items: Vec::new(),
        }
    }

    /// Iterates over the renderable items of this group, skipping
    /// unsupported versions.
    pub fn renderable_items(&self) -> impl Iterator<Item = &MenuItemV1> {
        self.items.iter().filter_map(MenuItem::as_v1)
    }
}

// =============================================================================
// Builder Schema
// =============================================================================

/// The whole menu document: header blocks plus ordered menu groups.
///
/// Round-tripped to the remote API as one JSON document on submit; there is
/// no partial or incremental save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSchema {
    /// Header blocks, in display order.
    #[serde(default)]
    pub header: Vec<HeaderBlock>,

    /// Menu groups, in display order.
    #[serde(default)]
    pub menu: Vec<MenuGroup>,
}

impl BuilderSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a dish up by id across the whole schema.
    pub fn find_item(&self, id: &str) -> Option<&MenuItemV1> {
        self.menu
            .iter()
            .flat_map(|group| group.renderable_items())
            .find(|item| item.id == id)
    }

    /// Iterates over every renderable item in the schema, in display order.
    pub fn renderable_items(&self) -> impl Iterator<Item = &MenuItemV1> {
        self.menu.iter().flat_map(|group| group.renderable_items())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
