//! Static catalog of categories and items.

pub mod items;
pub mod model;

pub use items::{
    DEFAULT_ITEM_EMOJI, all_items, category_of, contains, emoji_for, find_item, items_in, search,
};
pub use model::{CatalogItem, Category};
