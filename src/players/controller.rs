//! Local player controller.

use smallvec::SmallVec;

use super::input::InputFrame;
use super::probe::SpatialProbe;
use super::targeting::Targeting;
use crate::core::{KitchenConfig, PlayerId, Vec3};
use crate::events::FeedbackBus;
use crate::net::Request;

/// The player this participant controls.
///
/// Movement and targeting run locally. Actions become requests for the
/// authority; nothing here touches items or counters.
#[derive(Clone, Debug)]
pub struct LocalPlayer {
    id: PlayerId,
    position: Vec3,
    walking: bool,
    targeting: Targeting,
    config: KitchenConfig,
}

impl LocalPlayer {
    #[must_use]
    pub fn new(id: PlayerId, position: Vec3, config: KitchenConfig) -> Self {
        Self {
            id,
            position,
            walking: false,
            targeting: Targeting::default(),
            config,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    #[must_use]
    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    /// Run one frame: move, retarget, then turn fired actions into
    /// requests for the selected counter.
    pub fn tick(
        &mut self,
        input: &InputFrame,
        dt: f32,
        probe: &dyn SpatialProbe,
        bus: &mut FeedbackBus,
    ) -> SmallVec<[Request; 2]> {
        let movement = input.movement();
        self.walking = movement.length_squared() > self.config.movement.walk_threshold;
        if self.walking {
            let step = movement * (self.config.movement.move_speed * dt);
            self.position.x += step.x;
            self.position.z += step.y;
        }

        if let Some(event) =
            self.targeting
                .update(self.position.ground(), movement, probe, &self.config)
        {
            bus.publish(event);
        }

        input
            .actions()
            .filter_map(|action| self.targeting.route(action))
            .collect()
    }
}
