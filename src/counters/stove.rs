//! Frying and burning counter.
//!
//! ## States
//!
//! ```text
//! Idle ──place (fry recipe)──▶ Frying ──fry timer──▶ Burning ──burn timer──▶ Burned
//!   │                           │    └─(no burn recipe)─▶ Fried
//!   └──place (burn recipe)──────┼──────────────────────▶ Burning
//!                               └─(item gone)─▶ Idle
//! ```
//!
//! Timers are replicated so observers can render progress. The state
//! machine here is pure: steps that destroy or spawn items are returned to
//! the kitchen, which performs them and then calls [`StoveCounter::finish_fry`]
//! or [`StoveCounter::finish_burn`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CounterId, HolderId, ItemId, Vec3};
use crate::items::{HeldItem, HeldSlot, ItemHolder, ItemTypeId};
use crate::net::{CounterVar, Replicated};
use crate::recipes::{Burn, BurnRecipe, Fry, FryRecipe, RecipeBook};

/// Where a stove is in its cook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoveState {
    #[default]
    Idle,
    Frying,
    Fried,
    Burning,
    Burned,
}

impl StoveState {
    /// True while a timer is running (the sizzle indicator).
    #[must_use]
    pub const fn is_cooking(self) -> bool {
        matches!(self, StoveState::Frying | StoveState::Burning)
    }

}

impl std::fmt::Display for StoveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoveState::Idle => "idle",
            StoveState::Frying => "frying",
            StoveState::Fried => "fried",
            StoveState::Burning => "burning",
            StoveState::Burned => "burned",
        };
        f.write_str(name)
    }
}

/// How an item entering the stove will be cooked.
#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    Fry(FryRecipe),
    Burn(BurnRecipe),
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoveStep {
    /// Nothing to advance.
    Idle,

    /// A timer advanced without finishing.
    Advanced,

    /// The fry timer finished. Replace `consumed` with `output`, then call
    /// [`StoveCounter::finish_fry`].
    FryDone { consumed: ItemId, output: ItemTypeId },

    /// The burn timer finished. Replace `consumed` with `output`, then call
    /// [`StoveCounter::finish_burn`].
    BurnDone { consumed: ItemId, output: ItemTypeId },

    /// The stove was non-idle without an item, or with a recipe for an
    /// item it no longer holds, and was reset.
    Healed,
}

/// A stove with a fry stage and a burn stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoveCounter {
    id: CounterId,
    top: Vec3,
    slot: HeldSlot,
    fry_recipes: RecipeBook<Fry>,
    burn_recipes: RecipeBook<Burn>,
    fry_recipe: Option<FryRecipe>,
    burn_recipe: Option<BurnRecipe>,
    fry_timer_max: Replicated<f32>,
    burn_timer_max: Replicated<f32>,
    fry_timer: Replicated<f32>,
    burn_timer: Replicated<f32>,
    state: Replicated<StoveState>,
}

impl StoveCounter {
    #[must_use]
    pub fn new(
        id: CounterId,
        top: Vec3,
        fry_recipes: RecipeBook<Fry>,
        burn_recipes: RecipeBook<Burn>,
    ) -> Self {
        Self {
            id,
            top,
            slot: HeldSlot::empty(),
            fry_recipes,
            burn_recipes,
            fry_recipe: None,
            burn_recipe: None,
            fry_timer_max: Replicated::new(0.0),
            burn_timer_max: Replicated::new(0.0),
            fry_timer: Replicated::new(0.0),
            burn_timer: Replicated::new(0.0),
            state: Replicated::new(StoveState::Idle),
        }
    }

    #[must_use]
    pub fn id(&self) -> CounterId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> StoveState {
        self.state.get()
    }

    #[must_use]
    pub fn fry_timer(&self) -> f32 {
        self.fry_timer.get()
    }

    #[must_use]
    pub fn burn_timer(&self) -> f32 {
        self.burn_timer.get()
    }

    /// Normalized progress of the running stage, 0 otherwise.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.state.get() {
            StoveState::Frying => timer_progress(self.fry_timer.get(), self.fry_timer_max.get()),
            StoveState::Burning => {
                timer_progress(self.burn_timer.get(), self.burn_timer_max.get())
            }
            _ => 0.0,
        }
    }

    /// Decide how an item of `item_type` would be cooked. A fry recipe
    /// wins; otherwise a burn recipe for already-cooked items.
    #[must_use]
    pub fn placement_for(&self, item_type: ItemTypeId) -> Option<Placement> {
        if let Some(recipe) = self.fry_recipes.find(item_type) {
            return Some(Placement::Fry(recipe.clone()));
        }
        self.burn_recipes
            .find(item_type)
            .map(|recipe| Placement::Burn(recipe.clone()))
    }

    /// Start cooking an item that was just placed.
    pub fn begin(&mut self, placement: Placement) {
        match placement {
            Placement::Fry(recipe) => {
                self.fry_timer_max.set(recipe.threshold);
                self.fry_timer.set(0.0);
                self.burn_timer.set(0.0);
                self.burn_timer_max.set(0.0);
                self.fry_recipe = Some(recipe);
                self.burn_recipe = None;
                self.state.set(StoveState::Frying);
            }
            Placement::Burn(recipe) => {
                self.burn_timer_max.set(recipe.threshold);
                self.burn_timer.set(0.0);
                self.fry_timer.set(0.0);
                self.fry_timer_max.set(0.0);
                self.burn_recipe = Some(recipe);
                self.fry_recipe = None;
                self.state.set(StoveState::Burning);
            }
        }
    }

    /// Clear recipes and timers and go idle.
    pub fn reset(&mut self) {
        self.fry_recipe = None;
        self.burn_recipe = None;
        self.fry_timer.set(0.0);
        self.burn_timer.set(0.0);
        self.fry_timer_max.set(0.0);
        self.burn_timer_max.set(0.0);
        self.state.set(StoveState::Idle);
    }

    /// Advance the running timer by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> StoveStep {
        let state = self.state.get();
        if state == StoveState::Idle {
            return StoveStep::Idle;
        }
        let Some(held) = self.slot.get() else {
            return self.heal(state);
        };

        match state {
            StoveState::Frying => {
                let Some(recipe) = self
                    .fry_recipe
                    .as_ref()
                    .filter(|r| r.input == held.item_type)
                else {
                    return self.heal(state);
                };
                let (threshold, output) = (recipe.threshold, recipe.output);
                let timer = self.fry_timer.get() + dt;
                self.fry_timer.set(timer);
                tracing::trace!(counter = %self.id, timer, threshold, "frying");
                if timer >= threshold {
                    StoveStep::FryDone {
                        consumed: held.id,
                        output,
                    }
                } else {
                    StoveStep::Advanced
                }
            }
            StoveState::Burning => {
                let Some(recipe) = self
                    .burn_recipe
                    .as_ref()
                    .filter(|r| r.input == held.item_type)
                else {
                    return self.heal(state);
                };
                let (threshold, output) = (recipe.threshold, recipe.output);
                let timer = self.burn_timer.get() + dt;
                self.burn_timer.set(timer);
                tracing::trace!(counter = %self.id, timer, threshold, "burning");
                if timer >= threshold {
                    StoveStep::BurnDone {
                        consumed: held.id,
                        output,
                    }
                } else {
                    StoveStep::Advanced
                }
            }
            StoveState::Fried | StoveState::Burned | StoveState::Idle => StoveStep::Idle,
        }
    }

    /// Continue after the fried item replaced the raw one. Chains straight
    /// into burning when the new item has a burn recipe.
    pub fn finish_fry(&mut self, cooked: ItemTypeId) -> StoveState {
        self.fry_recipe = None;
        self.burn_recipe = self.burn_recipes.find(cooked).cloned();
        match &self.burn_recipe {
            Some(recipe) => {
                self.burn_timer_max.set(recipe.threshold);
                self.burn_timer.set(0.0);
                self.state.set(StoveState::Burning);
            }
            None => self.state.set(StoveState::Fried),
        }
        self.state.get()
    }

    /// Settle after the burned item replaced the cooked one.
    pub fn finish_burn(&mut self) -> StoveState {
        self.burn_recipe = None;
        self.state.set(StoveState::Burned);
        StoveState::Burned
    }

    fn heal(&mut self, from: StoveState) -> StoveStep {
        tracing::warn!(counter = %self.id, %from, "stove item does not match its recipe, resetting");
        self.reset();
        StoveStep::Healed
    }

    /// Take pending variable changes in publication order: timer maxes,
    /// then timers, then state.
    pub fn drain_changes(&mut self) -> SmallVec<[CounterVar; 4]> {
        let mut changes = SmallVec::new();
        if let Some(v) = self.fry_timer_max.take_dirty() {
            changes.push(CounterVar::FryTimerMax(v));
        }
        if let Some(v) = self.burn_timer_max.take_dirty() {
            changes.push(CounterVar::BurnTimerMax(v));
        }
        if let Some(v) = self.fry_timer.take_dirty() {
            changes.push(CounterVar::FryTimer(v));
        }
        if let Some(v) = self.burn_timer.take_dirty() {
            changes.push(CounterVar::BurnTimer(v));
        }
        if let Some(v) = self.state.take_dirty() {
            changes.push(CounterVar::StoveState(v));
        }
        changes
    }

    /// Current values of every replicated variable, in publication order.
    #[must_use]
    pub fn vars(&self) -> SmallVec<[CounterVar; 4]> {
        smallvec::smallvec![
            CounterVar::FryTimerMax(self.fry_timer_max.get()),
            CounterVar::BurnTimerMax(self.burn_timer_max.get()),
            CounterVar::FryTimer(self.fry_timer.get()),
            CounterVar::BurnTimer(self.burn_timer.get()),
            CounterVar::StoveState(self.state.get()),
        ]
    }
}

/// `timer / max` clamped to `[0, 1]`, or 0 when no max is known.
#[must_use]
pub fn timer_progress(timer: f32, max: f32) -> f32 {
    if max > 0.0 {
        (timer / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl ItemHolder for StoveCounter {
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
    }

    fn clear_item(&mut self) {
        self.slot.clear();
    }
}
