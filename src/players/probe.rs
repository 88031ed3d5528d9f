//! Directional volume queries on the floor plane.
//!
//! Targeting only needs one capability from the physics layer: sweep a box
//! along a direction and report what it touched and how far it travelled.
//! [`SpatialProbe`] is that seam. [`CounterLayout`] is a small in-memory
//! implementation over axis-aligned boxes, used by headless hosts and tests.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CounterId, LayerMask, Vec2};

/// A bounded swept-box query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeQuery {
    pub origin: Vec2,
    /// Unit sweep direction.
    pub direction: Vec2,
    /// `x` is half the width across the sweep, `y` half the depth along it.
    pub half_extents: Vec2,
    pub max_distance: f32,
    pub mask: LayerMask,
    /// Stop collecting after this many hits.
    pub max_hits: usize,
}

/// One thing the probe touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeHit {
    /// How far the box travelled before touching. 0 if it started inside.
    pub distance: f32,
    /// The interactable behind the collider, if it is one.
    pub target: Option<CounterId>,
}

pub type ProbeHits = SmallVec<[ProbeHit; 4]>;

/// The spatial query capability targeting consumes.
pub trait SpatialProbe {
    /// Hits in detection order, at most `query.max_hits` of them.
    fn cast(&self, query: &ProbeQuery) -> ProbeHits;
}

/// An axis-aligned box on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layer: LayerMask,
    pub target: Option<CounterId>,
}

impl Collider {
    /// Where a sweep described by `query` first touches this box.
    fn sweep(&self, query: &ProbeQuery) -> Option<f32> {
        let dir = query.direction;
        let perp = Vec2::new(-dir.y, dir.x);
        let rel = self.center - query.origin;

        let along = rel.dot(dir);
        let side = rel.dot(perp);
        let ext_along = (self.half_extents.x * dir.x).abs() + (self.half_extents.y * dir.y).abs();
        let ext_side = (self.half_extents.x * perp.x).abs() + (self.half_extents.y * perp.y).abs();

        if side.abs() > ext_side + query.half_extents.x {
            return None;
        }
        if along + ext_along < -query.half_extents.y {
            return None;
        }
        let distance = (along - ext_along - query.half_extents.y).max(0.0);
        (distance <= query.max_distance).then_some(distance)
    }
}

/// Colliders for a static kitchen layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterLayout {
    colliders: Vec<Collider>,
}

impl CounterLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interactable counter on the default interactable layer.
    pub fn add_counter(&mut self, counter: CounterId, center: Vec2, half_extents: Vec2) {
        self.colliders.push(Collider {
            center,
            half_extents,
            layer: LayerMask::INTERACTABLE,
            target: Some(counter),
        });
    }

    /// Add a collider that is not interactable.
    pub fn add_obstacle(&mut self, center: Vec2, half_extents: Vec2, layer: LayerMask) {
        self.colliders.push(Collider {
            center,
            half_extents,
            layer,
            target: None,
        });
    }

    /// Move a counter's collider. Returns false if the counter has none.
    pub fn set_center(&mut self, counter: CounterId, center: Vec2) -> bool {
        match self.colliders.iter_mut().find(|c| c.target == Some(counter)) {
            Some(collider) => {
                collider.center = center;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SpatialProbe for CounterLayout {
    fn cast(&self, query: &ProbeQuery) -> ProbeHits {
        let mut hits = ProbeHits::new();
        if query.direction.length_squared() <= f32::EPSILON {
            return hits;
        }
        for collider in &self.colliders {
            if hits.len() >= query.max_hits {
                break;
            }
            if !collider.layer.intersects(query.mask) {
                continue;
            }
            if let Some(distance) = collider.sweep(query) {
                hits.push(ProbeHit {
                    distance,
                    target: collider.target,
                });
            }
        }
        hits
    }
}
