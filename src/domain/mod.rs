//! Domain data shapes handed to presentation code.
//!
//! Every record here is a transient value: produced by one catalog call,
//! never cached and never mutated after construction.

pub mod category;

pub use category::{map_category, CategoryVariant};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a collection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItemSummary {
    /// Present when the listing carries it or it can be read off `reference_url`.
    pub id: Option<u32>,
    pub name: String,
    /// Locator for the follow-up detail fetch.
    pub reference_url: String,
    pub thumbnail_url: Option<String>,
}

/// Full record for a single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    /// Category labels in upstream order; duplicates are kept.
    pub categories: Vec<String>,
    /// Absent for some alternate forms upstream.
    pub base_score: Option<u32>,
    pub height: u32,
    pub weight: u32,
}

/// Detail record paired with the presentation variant of each category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCard {
    pub details: ItemDetails,
    pub variants: Vec<CategoryVariant>,
}

impl ItemCard {
    pub fn from_details(details: ItemDetails) -> Self {
        let variants = details
            .categories
            .iter()
            .map(|label| map_category(Some(label)))
            .collect();
        Self { details, variants }
    }
}

/// Identifies a catalog entry either by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Id(u32),
    Name(String),
}

impl ItemRef {
    /// Path segment used when addressing the entry.
    pub fn as_segment(&self) -> String {
        match self {
            ItemRef::Id(id) => id.to_string(),
            ItemRef::Name(name) => name.clone(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRef::Id(id) => write!(f, "{}", id),
            ItemRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<u32> for ItemRef {
    fn from(id: u32) -> Self {
        ItemRef::Id(id)
    }
}

impl From<&str> for ItemRef {
    /// Only canonical decimals become ids; `"007"` or `"+7"` stay names so the
    /// request path keeps the caller's text.
    fn from(value: &str) -> Self {
        match value.parse::<u32>() {
            Ok(id) if id.to_string() == value => ItemRef::Id(id),
            _ => ItemRef::Name(value.to_string()),
        }
    }
}

impl From<String> for ItemRef {
    fn from(value: String) -> Self {
        ItemRef::from(value.as_str())
    }
}
