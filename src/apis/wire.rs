//! Upstream JSON shapes and their conversion into domain records.

use serde::Deserialize;

use crate::common::constants::sprite_url;
use crate::domain::{CollectionItemSummary, ItemDetails};

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub results: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub url: String,
}

impl PageEntry {
    pub fn into_summary(self) -> CollectionItemSummary {
        let id = self.id.or_else(|| id_from_url(&self.url));
        CollectionItemSummary {
            id,
            thumbnail_url: id.map(sprite_url),
            name: self.name,
            reference_url: self.url,
        }
    }
}

/// Reads the trailing numeric segment of a resource URL, e.g. `.../pokemon/25/`.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl From<DetailResponse> for ItemDetails {
    fn from(raw: DetailResponse) -> Self {
        ItemDetails {
            id: raw.id,
            name: raw.name,
            image_url: raw.sprites.front_default,
            categories: raw.types.into_iter().map(|slot| slot.kind.name).collect(),
            base_score: raw.base_experience,
            height: raw.height,
            weight: raw.weight,
        }
    }
}
