//! The holder capability shared by counters and players.

use serde::{Deserialize, Serialize};

use super::item_type::ItemTypeId;
use crate::core::{HolderId, ItemId, Vec3};

/// The item a holder currently owns, with its type cached for recipe lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub id: ItemId,
    pub item_type: ItemTypeId,
}

/// Anything that can own at most one item.
///
/// Only the kitchen's ownership operations call `set_item` and
/// `clear_item`; they keep the item's back-reference in sync. Implementors
/// may override the setters to react to attach and detach.
pub trait ItemHolder {
    /// This holder's handle.
    fn holder_id(&self) -> HolderId;

    /// World-space point a held item snaps to.
    fn attach_point(&self) -> Vec3;

    /// The held item, if any.
    fn held(&self) -> Option<HeldItem>;

    /// Record a newly attached item.
    fn set_item(&mut self, item: HeldItem);

    /// Forget the held item without destroying it.
    fn clear_item(&mut self);

    /// The held item's id, if any.
    fn item(&self) -> Option<ItemId> {
        self.held().map(|h| h.id)
    }

    /// Check if an item is held.
    fn has_item(&self) -> bool {
        self.held().is_some()
    }
}

/// Plain single-item storage that holder implementations delegate to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldSlot {
    item: Option<HeldItem>,
}

impl HeldSlot {
    /// An empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self { item: None }
    }

    #[must_use]
    pub fn get(&self) -> Option<HeldItem> {
        self.item
    }

    pub fn set(&mut self, item: HeldItem) {
        self.item = Some(item);
    }

    pub fn clear(&mut self) {
        self.item = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot() {
        let mut slot = HeldSlot::empty();
        assert_eq!(slot.get(), None);

        let held = HeldItem {
            id: ItemId(3),
            item_type: ItemTypeId(1),
        };
        slot.set(held);
        assert_eq!(slot.get(), Some(held));

        slot.clear();
        assert_eq!(slot.get(), None);
    }
}
