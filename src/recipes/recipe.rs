//! Recipe definitions.
//!
//! A recipe turns one item type into another once a threshold is reached.
//! The three kinds differ only in what the threshold measures:
//!
//! | Kind   | Threshold         | Authored default |
//! |--------|-------------------|------------------|
//! | `Cut`  | number of chops   | 3                |
//! | `Fry`  | seconds on stove  | 5.0              |
//! | `Burn` | seconds on stove  | 8.0              |
//!
//! The kind is a type parameter so a fry recipe can never be handed to
//! code expecting a burn recipe.

use std::fmt::Debug;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::items::ItemTypeId;

/// A family of recipes sharing a threshold unit.
pub trait RecipeKind: Copy + Debug + PartialEq + Default + 'static {
    /// What the threshold counts.
    type Threshold: Copy + Debug + PartialEq + PartialOrd + Serialize + DeserializeOwned;

    /// Name used in logs.
    const NAME: &'static str;

    /// Threshold used when none is authored.
    fn default_threshold() -> Self::Threshold;

    /// `value / threshold` as a float, clamped to `[0, 1]`.
    fn normalize(value: Self::Threshold, threshold: Self::Threshold) -> f32;
}

/// Chopping on a cutting counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cut;

/// First stage on a stove: raw to cooked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fry;

/// Second stage on a stove: cooked to burned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Burn;

impl RecipeKind for Cut {
    type Threshold = u32;
    const NAME: &'static str = "cut";

    fn default_threshold() -> u32 {
        3
    }

    fn normalize(value: u32, threshold: u32) -> f32 {
        if threshold == 0 {
            return 1.0;
        }
        (value as f32 / threshold as f32).clamp(0.0, 1.0)
    }
}

fn normalize_seconds(value: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 1.0;
    }
    (value / threshold).clamp(0.0, 1.0)
}

impl RecipeKind for Fry {
    type Threshold = f32;
    const NAME: &'static str = "fry";

    fn default_threshold() -> f32 {
        5.0
    }

    fn normalize(value: f32, threshold: f32) -> f32 {
        normalize_seconds(value, threshold)
    }
}

impl RecipeKind for Burn {
    type Threshold = f32;
    const NAME: &'static str = "burn";

    fn default_threshold() -> f32 {
        8.0
    }

    fn normalize(value: f32, threshold: f32) -> f32 {
        normalize_seconds(value, threshold)
    }
}

/// An input → output transformation with a cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Recipe<K: RecipeKind> {
    pub input: ItemTypeId,
    pub output: ItemTypeId,
    pub threshold: K::Threshold,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: RecipeKind> Recipe<K> {
    /// Create a recipe with an explicit threshold.
    #[must_use]
    pub fn new(input: ItemTypeId, output: ItemTypeId, threshold: K::Threshold) -> Self {
        Self {
            input,
            output,
            threshold,
            kind: PhantomData,
        }
    }

    /// Create a recipe with the kind's authored default threshold.
    #[must_use]
    pub fn with_default_threshold(input: ItemTypeId, output: ItemTypeId) -> Self {
        Self::new(input, output, K::default_threshold())
    }

    /// Normalized progress for an accumulated value.
    #[must_use]
    pub fn progress(&self, value: K::Threshold) -> f32 {
        K::normalize(value, self.threshold)
    }

    /// Check whether `value` has reached the threshold.
    #[must_use]
    pub fn is_complete(&self, value: K::Threshold) -> bool {
        value >= self.threshold
    }
}

pub type CutRecipe = Recipe<Cut>;
pub type FryRecipe = Recipe<Fry>;
pub type BurnRecipe = Recipe<Burn>;
