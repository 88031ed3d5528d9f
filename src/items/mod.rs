//! Item ownership model: item types, item entities and holders.
//!
//! ## Key Components
//!
//! - [`ItemType`] / [`ItemCatalog`]: immutable item definitions
//! - [`Item`]: a spawned item with a back-reference to its owner
//! - [`ItemHolder`]: the capability every counter and player implements
//!
//! Items move between holders only through the kitchen's `transfer`,
//! which keeps the holder's slot and the item's back-reference consistent.

mod holder;
mod item;
mod item_type;

pub use holder::{HeldItem, HeldSlot, ItemHolder};
pub use item::{Item, LocalPose};
pub use item_type::{ItemCatalog, ItemType, ItemTypeId};
