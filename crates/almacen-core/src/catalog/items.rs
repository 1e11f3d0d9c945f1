//! The fixed item taxonomy.
//!
//! The catalog is read-only reference data. Every community's record set
//! is seeded from it, and every mutation validates item membership here.

use super::model::{CatalogItem, Category};

/// Fallback emoji for names that are not in the catalog.
pub const DEFAULT_ITEM_EMOJI: &str = "📦";

const CATALOG: &[CatalogItem] = &[
    CatalogItem::new(Category::Armas, "🔫", "glock"),
    CatalogItem::new(Category::Armas, "🏹", "vintage"),
    CatalogItem::new(Category::Armas, "💣", "beretta"),
    CatalogItem::new(Category::Armas, "🪓", "hachas"),
    CatalogItem::new(Category::Armas, "🔪", "machetes"),
    CatalogItem::new(Category::Cargadores, "📦", "cargador pistolas"),
    CatalogItem::new(Category::Cargadores, "🗃️", "cargador subfusil"),
    CatalogItem::new(Category::Drogas, "🚬", "bongs"),
    CatalogItem::new(Category::Drogas, "💊", "pcp"),
    CatalogItem::new(Category::Drogas, "🍪", "galletas"),
    CatalogItem::new(Category::Drogas, "💉", "fentanilo"),
    CatalogItem::new(Category::Drogas, "🌿", "marihuana"),
    CatalogItem::new(Category::Planos, "🏪", "supermercado"),
    CatalogItem::new(Category::Planos, "⛽", "gasolinera"),
    CatalogItem::new(Category::Planos, "💎", "joyeria"),
    CatalogItem::new(Category::Planos, "💇", "barberia"),
    CatalogItem::new(Category::Planos, "🍺", "licoreria"),
    CatalogItem::new(Category::Planos, "➕", "farmacia"),
    CatalogItem::new(Category::Planos, "🛠️", "arquitectónico"),
    CatalogItem::new(Category::Planos, "👕", "ropa"),
    CatalogItem::new(Category::Planos, "🎨", "tatuajes"),
];

/// Returns every catalog item in display order.
pub fn all_items() -> &'static [CatalogItem] {
    CATALOG
}

/// Returns the items of one category in display order.
pub fn items_in(category: Category) -> impl Iterator<Item = &'static CatalogItem> {
    CATALOG.iter().filter(move |item| item.category == category)
}

/// Exact, case-sensitive lookup of an item by name.
pub fn find_item(name: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.name == name)
}

/// Whether `name` is a catalog item.
pub fn contains(name: &str) -> bool {
    find_item(name).is_some()
}

/// The category owning `name`, found by membership search.
pub fn category_of(name: &str) -> Option<Category> {
    find_item(name).map(|item| item.category)
}

/// Emoji for an item name; matching ignores case and surrounding whitespace.
pub fn emoji_for(name: &str) -> &'static str {
    let needle = name.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|item| item.name.to_lowercase() == needle)
        .map(|item| item.emoji)
        .unwrap_or(DEFAULT_ITEM_EMOJI)
}

/// Case-insensitive substring search over item names.
pub fn search(term: &str) -> Vec<&'static CatalogItem> {
    let needle = term.to_lowercase();
    CATALOG
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}
