//! Cutting counter.
//!
//! Progress is an integer chop count. The matching recipe is re-resolved
//! whenever an item is attached or detached, and both attaching and
//! detaching put the count back to zero.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CounterId, HolderId, ItemId, Vec3};
use crate::error::Rejection;
use crate::items::{HeldItem, HeldSlot, ItemHolder, ItemTypeId};
use crate::net::{CounterVar, Replicated};
use crate::recipes::{Cut, CutRecipe, RecipeBook};

/// Result of one chop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CutStep {
    /// Progress advanced but the recipe is not finished.
    Advanced { progress: f32 },

    /// The threshold was reached. The caller must destroy `consumed` and
    /// spawn `output` onto this counter within the same action.
    Complete {
        progress: f32,
        consumed: ItemId,
        output: ItemTypeId,
    },
}

impl CutStep {
    /// Normalized progress reported for this chop.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match *self {
            CutStep::Advanced { progress } | CutStep::Complete { progress, .. } => progress,
        }
    }
}

/// A counter that turns items into their cut variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CuttingCounter {
    id: CounterId,
    top: Vec3,
    slot: HeldSlot,
    recipes: RecipeBook<Cut>,
    recipe: Option<CutRecipe>,
    progress: Replicated<u32>,
}

impl CuttingCounter {
    #[must_use]
    pub fn new(id: CounterId, top: Vec3, recipes: RecipeBook<Cut>) -> Self {
        Self {
            id,
            top,
            slot: HeldSlot::empty(),
            recipes,
            recipe: None,
            progress: Replicated::new(0),
        }
    }

    #[must_use]
    pub fn id(&self) -> CounterId {
        self.id
    }

    /// Recipe matched to the held item, if any.
    #[must_use]
    pub fn recipe(&self) -> Option<&CutRecipe> {
        self.recipe.as_ref()
    }

    /// Chops so far on the held item.
    #[must_use]
    pub fn cuts(&self) -> u32 {
        self.progress.get()
    }

    /// Normalized progress, 0 when nothing cuttable is held.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.recipe
            .as_ref()
            .map_or(0.0, |recipe| recipe.progress(self.progress.get()))
    }

    /// Zero the chop count.
    pub fn reset_progress(&mut self) {
        self.progress.set(0);
    }

    /// Apply one chop.
    pub fn cut(&mut self) -> Result<CutStep, Rejection> {
        let held = self.slot.get().ok_or(Rejection::NothingToCut)?;
        let recipe = self.recipe.as_ref().ok_or(Rejection::NoRecipe)?;

        let cuts = self.progress.get().saturating_add(1);
        let progress = recipe.progress(cuts);
        let step = if recipe.is_complete(cuts) {
            CutStep::Complete {
                progress,
                consumed: held.id,
                output: recipe.output,
            }
        } else {
            CutStep::Advanced { progress }
        };

        self.progress.set(cuts);
        Ok(step)
    }

    /// Take pending variable changes for publication.
    pub fn drain_changes(&mut self) -> SmallVec<[CounterVar; 4]> {
        let mut changes = SmallVec::new();
        if let Some(cuts) = self.progress.take_dirty() {
            changes.push(CounterVar::CutProgress(cuts));
        }
        changes
    }

    /// Current values of every replicated variable.
    #[must_use]
    pub fn vars(&self) -> SmallVec<[CounterVar; 4]> {
        smallvec::smallvec![CounterVar::CutProgress(self.progress.get())]
    }
}

impl ItemHolder for CuttingCounter {
    fn holder_id(&self) -> HolderId {
        HolderId::Counter(self.id)
    }

    fn attach_point(&self) -> Vec3 {
        self.top
    }

    fn held(&self) -> Option<HeldItem> {
        self.slot.get()
    }

    fn set_item(&mut self, item: HeldItem) {
        self.slot.set(item);
        self.recipe = self.recipes.find(item.item_type).cloned();
        self.progress.set(0);
    }

    fn clear_item(&mut self) {
        self.slot.clear();
        self.recipe = None;
        self.progress.set(0);
    }
}
