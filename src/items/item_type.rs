//! Item types - static item data.
//!
//! `ItemType` holds the immutable properties of a kind of item, such as
//! "Tomato" or "Cheese Slices". Runtime state (who holds it) lives on
//! [`Item`](super::Item).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Identifier for an item type.
///
/// Recipes and replicated spawn notifications refer to item types by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemTypeId(pub u16);

impl ItemTypeId {
    /// Create a new item type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemType({})", self.0)
    }
}

/// Static item type definition. Never mutated after load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    /// Unique identifier.
    pub id: ItemTypeId,

    /// Display name.
    pub name: String,

    /// UI icon key, resolved by the presentation layer.
    pub icon: Option<String>,
}

impl ItemType {
    /// Create a new item type.
    #[must_use]
    pub fn new(id: ItemTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
        }
    }

    /// Set the icon key (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Registry of item types.
///
/// ## Example
///
/// ```
/// use coop_kitchen::items::{ItemCatalog, ItemType, ItemTypeId};
///
/// let mut catalog = ItemCatalog::new();
/// catalog.register(ItemType::new(ItemTypeId::new(1), "Tomato"));
///
/// assert_eq!(catalog.get(ItemTypeId::new(1)).unwrap().name, "Tomato");
/// assert_eq!(catalog.by_name("Tomato").map(|t| t.id), Some(ItemTypeId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    types: FxHashMap<ItemTypeId, ItemType>,
}

impl ItemCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item type.
    ///
    /// Panics if a type with the same ID already exists.
    pub fn register(&mut self, item_type: ItemType) -> ItemTypeId {
        let id = item_type.id;
        if self.types.contains_key(&id) {
            panic!("Item type {:?} already registered", id);
        }
        self.types.insert(id, item_type);
        id
    }

    /// Get an item type by ID.
    #[must_use]
    pub fn get(&self, id: ItemTypeId) -> Option<&ItemType> {
        self.types.get(&id)
    }

    /// Find an item type by display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ItemType> {
        self.types.values().find(|t| t.name == name)
    }

    /// Display name for an item type, or `"?"` when unknown.
    #[must_use]
    pub fn name_of(&self, id: ItemTypeId) -> &str {
        self.types.get(&id).map_or("?", |t| t.name.as_str())
    }

    /// Check if an item type is registered.
    #[must_use]
    pub fn contains(&self, id: ItemTypeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Get the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all item types.
    pub fn iter(&self) -> impl Iterator<Item = &ItemType> {
        self.types.values()
    }
}
