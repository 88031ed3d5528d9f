//! Kitchen configuration types.
//!
//! Hosts configure the simulation at startup by providing:
//! - `TargetingConfig`: How far and how wide a player reaches for counters
//! - `MovementConfig`: Player walking speed and dead zone
//! - `KitchenConfig`: Combines all configuration
//!
//! Recipe data is not part of this configuration; each counter receives
//! its own pre-loaded recipe books when it is added to the kitchen.

use serde::{Deserialize, Serialize};

use super::math::Vec2;

/// Bit set of collision layers a probe is allowed to hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Layer that counters live on by default.
    pub const INTERACTABLE: LayerMask = LayerMask(1 << 6);

    /// Mask containing a single layer index (0-31).
    #[must_use]
    pub const fn layer(index: u8) -> Self {
        Self(1 << index)
    }

    /// Check whether the two masks share any layer.
    #[must_use]
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Union of two masks.
    #[must_use]
    pub const fn with(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::INTERACTABLE
    }
}

/// Interaction probe parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetingConfig {
    /// How far along the facing direction the probe sweeps.
    pub interact_distance: f32,

    /// Half extents of the swept box on the floor plane.
    pub probe_half_extents: Vec2,

    /// Upper bound on hits collected per tick.
    pub max_probe_hits: usize,

    /// Layers the probe is filtered to.
    pub interactable_layer: LayerMask,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            interact_distance: 2.0,
            probe_half_extents: Vec2::new(0.5, 0.5),
            max_probe_hits: 4,
            interactable_layer: LayerMask::INTERACTABLE,
        }
    }
}

/// Player movement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Units per second at full stick deflection.
    pub move_speed: f32,

    /// Squared input magnitude below which the player is standing still
    /// and the facing direction is left unchanged.
    pub walk_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            walk_threshold: 0.001,
        }
    }
}

/// Complete kitchen configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    pub targeting: TargetingConfig,
    pub movement: MovementConfig,
}

impl KitchenConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interaction reach.
    #[must_use]
    pub fn with_interact_distance(mut self, distance: f32) -> Self {
        self.targeting.interact_distance = distance;
        self
    }

    /// Set the probe half extents.
    #[must_use]
    pub fn with_probe_half_extents(mut self, half_extents: Vec2) -> Self {
        self.targeting.probe_half_extents = half_extents;
        self
    }

    /// Set the per-tick probe hit cap.
    #[must_use]
    pub fn with_max_probe_hits(mut self, max: usize) -> Self {
        assert!(max > 0, "Probe must collect at least one hit");
        self.targeting.max_probe_hits = max;
        self
    }

    /// Set the layers the probe may hit.
    #[must_use]
    pub fn with_interactable_layer(mut self, layer: LayerMask) -> Self {
        self.targeting.interactable_layer = layer;
        self
    }

    /// Set the player movement speed.
    #[must_use]
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.movement.move_speed = speed;
        self
    }
}
