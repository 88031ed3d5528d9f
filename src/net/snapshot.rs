//! Late-join state capture.

use serde::{Deserialize, Serialize};

use super::message::CounterVar;
use crate::core::{ClientId, CounterId, HolderId, ItemId, PlayerId, Vec3};
use crate::counters::CounterKind;
use crate::error::KitchenError;
use crate::items::ItemTypeId;

/// A counter as a newcomer needs to see it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub id: CounterId,
    pub kind: CounterKind,
    pub attach_point: Vec3,
    pub vars: Vec<CounterVar>,
}

/// A connected player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub client: ClientId,
}

/// A live item and where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub item_type: ItemTypeId,
    pub owner: Option<HolderId>,
    pub anchor: Vec3,
}

/// Everything a replica needs to start following the notification stream
/// at `next_seq`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub next_seq: u64,
    pub counters: Vec<CounterRecord>,
    pub players: Vec<PlayerRecord>,
    pub items: Vec<ItemRecord>,
}

impl Snapshot {
    pub fn encode(&self) -> Result<Vec<u8>, KitchenError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KitchenError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
