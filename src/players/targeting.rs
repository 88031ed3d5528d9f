//! Interaction targeting.
//!
//! Each tick the player sweeps a box along its facing direction and
//! selects the nearest interactable hit. Observers hear about the
//! selection only when it changes.

use super::input::PlayerAction;
use super::probe::{ProbeQuery, SpatialProbe};
use crate::core::{CounterId, KitchenConfig, Vec2};
use crate::events::FeedbackEvent;
use crate::net::Request;

/// Facing direction and current selection for one local player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Targeting {
    facing: Vec2,
    selected: Option<CounterId>,
}

impl Default for Targeting {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, 1.0))
    }
}

impl Targeting {
    /// Start facing `facing` with nothing selected.
    #[must_use]
    pub fn new(facing: Vec2) -> Self {
        Self {
            facing: facing.normalize_or_zero(),
            selected: None,
        }
    }

    #[must_use]
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    #[must_use]
    pub fn selected(&self) -> Option<CounterId> {
        self.selected
    }

    /// Refresh the selection from `origin`.
    ///
    /// A non-zero `movement` turns the player first. Returns a
    /// `SelectionChanged` event when the selection differs from last tick.
    pub fn update(
        &mut self,
        origin: Vec2,
        movement: Vec2,
        probe: &dyn SpatialProbe,
        config: &KitchenConfig,
    ) -> Option<FeedbackEvent> {
        if movement.length_squared() > config.movement.walk_threshold {
            self.facing = movement.normalize_or_zero();
        }

        let targeting = &config.targeting;
        let hits = probe.cast(&ProbeQuery {
            origin,
            direction: self.facing,
            half_extents: targeting.probe_half_extents,
            max_distance: targeting.interact_distance,
            mask: targeting.interactable_layer,
            max_hits: targeting.max_probe_hits,
        });

        let mut nearest: Option<(f32, CounterId)> = None;
        for hit in &hits {
            let Some(target) = hit.target else { continue };
            if nearest.is_none_or(|(best, _)| hit.distance < best) {
                nearest = Some((hit.distance, target));
            }
        }
        let next = nearest.map(|(_, target)| target);

        if next == self.selected {
            return None;
        }
        tracing::debug!(from = ?self.selected, to = ?next, "selection changed");
        self.selected = next;
        Some(FeedbackEvent::SelectionChanged { target: next })
    }

    /// Turn an action into a request for the selected counter. Dropped when
    /// nothing is selected.
    #[must_use]
    pub fn route(&self, action: PlayerAction) -> Option<Request> {
        let counter = self.selected?;
        Some(match action {
            PlayerAction::Primary => Request::Interact { counter },
            PlayerAction::Secondary => Request::InteractAlternate { counter },
        })
    }
}
