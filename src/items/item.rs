//! Item entities - runtime item state.
//!
//! An `Item` is one concrete, networked piece of food. It remembers which
//! holder currently owns it through a [`HolderId`] handle; the holder is
//! the true owner and keeps the item id in its own slot.

use serde::{Deserialize, Serialize};

use super::item_type::ItemTypeId;
use crate::core::{HolderId, ItemId, Vec3};

/// Local transform of an item relative to its holder's attach point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalPose {
    /// Offset from the attach point.
    pub position: Vec3,

    /// Orientation as a quaternion (x, y, z, w).
    pub rotation: [f32; 4],
}

impl LocalPose {
    /// Snapped onto the attach point with no rotation.
    pub const IDENTITY: LocalPose = LocalPose {
        position: Vec3::ZERO,
        rotation: [0.0, 0.0, 0.0, 1.0],
    };
}

impl Default for LocalPose {
    fn default() -> Self {
        LocalPose::IDENTITY
    }
}

/// A spawned item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id for this instance.
    pub id: ItemId,

    /// What kind of item this is.
    pub item_type: ItemTypeId,

    /// Current owner. `None` only between spawn and first placement.
    pub owner: Option<HolderId>,

    /// Pose relative to the owner's attach point.
    pub pose: LocalPose,

    /// Holder's attach point as of the last move. Holders that walk around
    /// carry their items with them, so this goes stale between moves; use
    /// [`Item::position_at`] with the holder's current attach point.
    pub anchor: Vec3,
}

impl Item {
    /// Create an unowned item.
    #[must_use]
    pub fn new(id: ItemId, item_type: ItemTypeId) -> Self {
        Self {
            id,
            item_type,
            owner: None,
            pose: LocalPose::IDENTITY,
            anchor: Vec3::ZERO,
        }
    }

    /// Snap onto a holder's attach point.
    pub fn attach(&mut self, holder: HolderId, anchor: Vec3) {
        self.owner = Some(holder);
        self.anchor = anchor;
        self.pose = LocalPose::IDENTITY;
    }

    /// World position when the holder's attach point is at `attach_point`.
    #[must_use]
    pub fn position_at(&self, attach_point: Vec3) -> Vec3 {
        Vec3::new(
            attach_point.x + self.pose.position.x,
            attach_point.y + self.pose.position.y,
            attach_point.z + self.pose.position.z,
        )
    }
}
