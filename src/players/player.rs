//! The authority's record of a connected player.

use serde::{Deserialize, Serialize};

use crate::core::{ClientId, HolderId, PlayerId, Vec3};
use crate::items::{HeldItem, HeldSlot, ItemHolder};

/// Height of the hold point above the player's feet.
const HOLD_HEIGHT: f32 = 1.2;

/// A player as an item holder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    client: ClientId,
    /// Feet position on the floor.
    pub position: Vec3,
    slot: HeldSlot,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, client: ClientId) -> Self {
        Self {
            id,
            client,
            position: Vec3::ZERO,
            slot: HeldSlot::empty(),
        }
    }

    /// Place the player (builder pattern).
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn client(&self) -> ClientId {
        self.client
    }
}

impl ItemHolder for Player {
    fn holder_id(&self) -> HolderId {
        HolderId::Player(self.id)
    }

    fn attach_point(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y + HOLD_HEIGHT, self.position.z)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_point_follows_position() {
        let player = Player::new(PlayerId(0), ClientId(9)).at(Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(player.attach_point(), Vec3::new(1.0, HOLD_HEIGHT, 2.0));
        assert_eq!(player.holder_id(), HolderId::Player(PlayerId(0)));
        assert_eq!(player.client(), ClientId(9));
    }
}
