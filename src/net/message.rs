//! Wire messages between the authority and replicas.
//!
//! - [`Request`]: one-way, replica → authority. The sender's
//!   [`ClientId`] is supplied by the transport, never by the payload.
//! - [`Notification`]: one-way, authority → all. Wrapped in an
//!   [`Envelope`] carrying a sequence number so replicas can enforce
//!   emission order.
//!
//! Both encode with `bincode`.

use serde::{Deserialize, Serialize};

use crate::core::{ClientId, CounterId, HolderId, ItemId, PlayerId, Vec3};
use crate::counters::StoveState;
use crate::error::KitchenError;
use crate::items::ItemTypeId;

/// A player action aimed at a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Primary action: pick up, put down, swap.
    Interact { counter: CounterId },
    /// Secondary action: chop.
    InteractAlternate { counter: CounterId },
}

impl Request {
    /// The counter this request targets.
    #[must_use]
    pub const fn counter(&self) -> CounterId {
        match self {
            Request::Interact { counter } | Request::InteractAlternate { counter } => *counter,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, KitchenError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KitchenError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A replicated counter variable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CounterVar {
    CutProgress(u32),
    StoveState(StoveState),
    FryTimer(f32),
    BurnTimer(f32),
    FryTimerMax(f32),
    BurnTimerMax(f32),
}

/// Something the authority tells every replica.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// A client's player entered the kitchen.
    PlayerJoined { player: PlayerId, client: ClientId },

    /// A player left; any item it held was despawned first.
    PlayerLeft { player: PlayerId },

    /// A new item exists. It is unowned until the following `ItemMoved`.
    ItemSpawned { item: ItemId, item_type: ItemTypeId },

    /// Ownership change and reparent in one message.
    ItemMoved {
        item: ItemId,
        from: Option<HolderId>,
        to: HolderId,
        anchor: Vec3,
    },

    /// The item no longer exists.
    ItemDespawned { item: ItemId },

    /// A counter variable changed.
    CounterVar { counter: CounterId, var: CounterVar },

    /// A chop landed on a cutting counter.
    Cut { counter: CounterId, progress: f32 },

    /// A cutting counter's progress went back to zero.
    ProgressReset { counter: CounterId },
}

/// A notification stamped with its position in the authority's stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub seq: u64,
    pub body: Notification,
}

impl Envelope {
    pub fn encode(&self) -> Result<Vec<u8>, KitchenError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, KitchenError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
