//! Deterministic scenarios for tests, benches and headless hosts.
//!
//! - [`KitchenScenario`]: the standard five-counter kitchen
//! - [`Soak`]: seeded random driver with replica consistency checks

mod scenario;
mod soak;

pub use scenario::{food, KitchenScenario};
pub use soak::{Soak, SoakStats, SOAK_DT};
