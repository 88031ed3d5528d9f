//! Players: the authority-side holder and the local controller.
//!
//! ## Key Components
//!
//! - [`Player`]: a connected player as an item holder
//! - [`InputFrame`] / [`PlayerAction`]: normalized input
//! - [`SpatialProbe`] / [`CounterLayout`]: swept-box queries
//! - [`Targeting`]: nearest-interactable selection with change events
//! - [`LocalPlayer`]: movement plus action routing into requests

mod controller;
mod input;
mod player;
mod probe;
mod targeting;

pub use controller::LocalPlayer;
pub use input::{InputFrame, PlayerAction};
pub use player::Player;
pub use probe::{Collider, CounterLayout, ProbeHit, ProbeHits, ProbeQuery, SpatialProbe};
pub use targeting::Targeting;
