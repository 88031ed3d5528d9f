//! Plain transfer counter.

use serde::{Deserialize, Serialize};

use crate::core::{CounterId, HolderId, Vec3};
use crate::items::{HeldItem, HeldSlot, ItemHolder};

/// A counter that only stores an item. Its primary action is the plain
/// swap every other counter builds on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearCounter {
    id: CounterId,
    top: Vec3,
    slot: HeldSlot,
}

impl ClearCounter {
    #[must_use]
    pub fn new(id: CounterId, top: Vec3) -> Self {
        Self {
            id,
            top,
            slot: HeldSlot::empty(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CounterId {
        self.id
    }
}

impl ItemHolder for ClearCounter {
    fn holder_id(&self) -> HolderId {
        HolderId::Counter(self.id)
    }

    fn attach_point(&self) -> Vec3 {
        self.top
    }

    fn held(&self) -> Option<HeldItem> {
        self.slot.get()
    }

    fn set_item(&mut self, item: HeldItem) {
        self.slot.set(item);
    }

    fn clear_item(&mut self) {
        self.slot.clear();
    }
}
