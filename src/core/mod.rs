//! Core types: identifiers, math, configuration, RNG.
//!
//! These are the building blocks shared by every other module. Nothing in
//! here knows about counters, recipes or replication.

pub mod ids;
pub mod math;
pub mod config;
pub mod rng;

pub use ids::{ClientId, CounterId, HolderId, ItemId, PlayerId};
pub use math::{Vec2, Vec3};
pub use config::{KitchenConfig, LayerMask, MovementConfig, TargetingConfig};
pub use rng::SimRng;
