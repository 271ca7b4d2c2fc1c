//! Maps upstream category labels onto the closed set of presentation variants.
//!
//! The upstream vocabulary is open and may grow at any time, so lookup goes
//! through a constant table and anything absent from it falls back to
//! [`CategoryVariant::Default`].

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryVariant {
    #[default]
    Default,
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// Accepted labels. Matching is exact and case-sensitive.
const ACCEPTED: &[(&str, CategoryVariant)] = &[
    ("default", CategoryVariant::Default),
    ("normal", CategoryVariant::Normal),
    ("fire", CategoryVariant::Fire),
    ("water", CategoryVariant::Water),
    ("grass", CategoryVariant::Grass),
    ("electric", CategoryVariant::Electric),
    ("ice", CategoryVariant::Ice),
    ("fighting", CategoryVariant::Fighting),
    ("poison", CategoryVariant::Poison),
    ("ground", CategoryVariant::Ground),
    ("flying", CategoryVariant::Flying),
    ("psychic", CategoryVariant::Psychic),
    ("bug", CategoryVariant::Bug),
    ("rock", CategoryVariant::Rock),
    ("ghost", CategoryVariant::Ghost),
    ("dragon", CategoryVariant::Dragon),
    ("dark", CategoryVariant::Dark),
    ("steel", CategoryVariant::Steel),
    ("fairy", CategoryVariant::Fairy),
];

impl CategoryVariant {
    pub const ALL: [CategoryVariant; 19] = [
        CategoryVariant::Default,
        CategoryVariant::Normal,
        CategoryVariant::Fire,
        CategoryVariant::Water,
        CategoryVariant::Grass,
        CategoryVariant::Electric,
        CategoryVariant::Ice,
        CategoryVariant::Fighting,
        CategoryVariant::Poison,
        CategoryVariant::Ground,
        CategoryVariant::Flying,
        CategoryVariant::Psychic,
        CategoryVariant::Bug,
        CategoryVariant::Rock,
        CategoryVariant::Ghost,
        CategoryVariant::Dragon,
        CategoryVariant::Dark,
        CategoryVariant::Steel,
        CategoryVariant::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        ACCEPTED
            .iter()
            .find(|(_, variant)| variant == self)
            .map(|(label, _)| *label)
            .unwrap_or("default")
    }
}

impl fmt::Display for CategoryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map an optional upstream label to a presentation variant. Never fails.
pub fn map_category(label: Option<&str>) -> CategoryVariant {
    let Some(label) = label.filter(|l| !l.is_empty()) else {
        return CategoryVariant::Default;
    };

    ACCEPTED
        .iter()
        .find(|(accepted, _)| *accepted == label)
        .map(|(_, variant)| *variant)
        .unwrap_or_default()
}
