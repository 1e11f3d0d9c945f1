//! Catalog domain models.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A top-level grouping of catalog items.
///
/// The string form (`armas`, `cargadores`, ...) is the segment used in
/// `cat_<category>` action identifiers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Armas,
    Cargadores,
    Drogas,
    Planos,
}

impl Category {
    /// All categories in menu order.
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }

    /// Emoji shown next to the category in menus and listings.
    pub fn emoji(self) -> &'static str {
        match self {
            Category::Armas => "🔫",
            Category::Cargadores => "📦",
            Category::Drogas => "💊",
            Category::Planos => "🗺️",
        }
    }

    /// Capitalized display label, e.g. `Armas`.
    pub fn label(self) -> &'static str {
        match self {
            Category::Armas => "Armas",
            Category::Cargadores => "Cargadores",
            Category::Drogas => "Drogas",
            Category::Planos => "Planos",
        }
    }

    /// One-line summary used on the home screen.
    pub fn summary(self) -> &'static str {
        match self {
            Category::Armas => "Pistolas y armamento",
            Category::Cargadores => "Munición",
            Category::Drogas => "Sustancias",
            Category::Planos => "Mapas de locaciones",
        }
    }
}

/// A single item of the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub emoji: &'static str,
    pub name: &'static str,
    pub category: Category,
}

impl CatalogItem {
    pub const fn new(category: Category, emoji: &'static str, name: &'static str) -> Self {
        Self {
            emoji,
            name,
            category,
        }
    }
}
