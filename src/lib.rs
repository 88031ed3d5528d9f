//! # coop-kitchen
//!
//! Server-authoritative simulation core for a cooperative cooking game.
//!
//! ## Design Principles
//!
//! 1. **One Authority**: A single [`Kitchen`] on the server owns every item
//!    and counter. Clients send [`Request`]s and wait for the broadcast;
//!    there is no client-side prediction.
//!
//! 2. **Atomic Ownership**: An item has at most one holder. A transfer
//!    releases, re-points and acquires in one step and is announced as one
//!    notification.
//!
//! 3. **Explicit Publication**: Replicated counter variables are flushed to
//!    an ordered outbox after every mutation. Replicas re-derive feedback
//!    events from that stream, including on late join.
//!
//! ## Modules
//!
//! - `core`: Ids, vector math, configuration, seeded RNG
//! - `items`: Item types, item entities, the holder capability
//! - `recipes`: Cut, fry and burn recipes and per-counter recipe books
//! - `counters`: Clear, cutting and stove state machines
//! - `kitchen`: The authority: ownership, request handling, tick, snapshots
//! - `net`: Requests, notifications, outbox, replica mirror
//! - `events`: Feedback event bus
//! - `players`: Player holder, input, spatial probe, targeting
//! - `sim`: Standard scenario and seeded soak driver

pub mod core;
pub mod counters;
pub mod error;
pub mod events;
pub mod items;
pub mod kitchen;
pub mod net;
pub mod players;
pub mod recipes;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    ClientId, CounterId, HolderId, ItemId, PlayerId,
    KitchenConfig, LayerMask, MovementConfig, TargetingConfig,
    SimRng, Vec2, Vec3,
};

pub use crate::error::{KitchenError, Rejection};

pub use crate::items::{HeldItem, Item, ItemCatalog, ItemHolder, ItemType, ItemTypeId};

pub use crate::recipes::{BurnRecipe, CutRecipe, FryRecipe, Recipe, RecipeBook};

pub use crate::counters::{
    ClearCounter, Counter, CounterKind, CuttingCounter, StoveCounter, StoveState,
};

pub use crate::kitchen::{Kitchen, RequestOutcome};

pub use crate::net::{Envelope, Notification, Replica, Request, Role, Snapshot};

pub use crate::events::{EventLog, FeedbackBus, FeedbackEvent, FeedbackKind, Topic};

pub use crate::players::{
    CounterLayout, InputFrame, LocalPlayer, PlayerAction, SpatialProbe, Targeting,
};
