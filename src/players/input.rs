//! Normalized input the core consumes.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// A discrete, edge-triggered action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Pick up, put down, swap.
    Primary,
    /// Chop.
    Secondary,
}

/// One frame of input: a move vector with magnitude at most 1 and the
/// actions that fired this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    movement: Vec2,
    pub primary: bool,
    pub secondary: bool,
}

impl InputFrame {
    /// Build a frame. `movement` longer than 1 is clamped.
    #[must_use]
    pub fn new(movement: Vec2) -> Self {
        Self {
            movement: movement.clamp_length(1.0),
            primary: false,
            secondary: false,
        }
    }

    /// A frame with no movement and no actions.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Fire an action this frame (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: PlayerAction) -> Self {
        match action {
            PlayerAction::Primary => self.primary = true,
            PlayerAction::Secondary => self.secondary = true,
        }
        self
    }

    #[must_use]
    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Actions fired this frame, primary first.
    pub fn actions(&self) -> impl Iterator<Item = PlayerAction> {
        let primary = self.primary.then_some(PlayerAction::Primary);
        let secondary = self.secondary.then_some(PlayerAction::Secondary);
        primary.into_iter().chain(secondary)
    }
}
