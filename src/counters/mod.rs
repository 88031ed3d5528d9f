//! Counter state machines.
//!
//! ## Key Components
//!
//! - [`ClearCounter`]: plain holder, primary action swaps with the player
//! - [`CuttingCounter`]: chop count toward a cut recipe
//! - [`StoveCounter`]: two-stage timed fry/burn machine
//! - [`Counter`]: tagged union the kitchen stores and dispatches on
//!
//! Counters only hold state and decide transitions. Creating, destroying
//! and moving items is done by the kitchen, which owns every item.

mod clear;
mod cutting;
mod stove;

pub use clear::ClearCounter;
pub use cutting::{CutStep, CuttingCounter};
pub use stove::{timer_progress, Placement, StoveCounter, StoveState, StoveStep};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CounterId, HolderId, Vec3};
use crate::items::{HeldItem, ItemHolder};
use crate::net::CounterVar;

/// Which kind of counter this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    Clear,
    Cutting,
    Stove,
}

/// Any counter in the kitchen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Counter {
    Clear(ClearCounter),
    Cutting(CuttingCounter),
    Stove(StoveCounter),
}

impl Counter {
    #[must_use]
    pub fn id(&self) -> CounterId {
        match self {
            Counter::Clear(c) => c.id(),
            Counter::Cutting(c) => c.id(),
            Counter::Stove(c) => c.id(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CounterKind {
        match self {
            Counter::Clear(_) => CounterKind::Clear,
            Counter::Cutting(_) => CounterKind::Cutting,
            Counter::Stove(_) => CounterKind::Stove,
        }
    }

    /// Normalized progress shown over the counter.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self {
            Counter::Clear(_) => 0.0,
            Counter::Cutting(c) => c.progress(),
            Counter::Stove(c) => c.progress(),
        }
    }

    #[must_use]
    pub fn as_cutting(&self) -> Option<&CuttingCounter> {
        match self {
            Counter::Cutting(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_stove(&self) -> Option<&StoveCounter> {
        match self {
            Counter::Stove(c) => Some(c),
            _ => None,
        }
    }

    /// Take pending replicated variable changes.
    pub fn drain_changes(&mut self) -> SmallVec<[CounterVar; 4]> {
        match self {
            Counter::Clear(_) => SmallVec::new(),
            Counter::Cutting(c) => c.drain_changes(),
            Counter::Stove(c) => c.drain_changes(),
        }
    }

    /// Current replicated variables, for late-join snapshots.
    #[must_use]
    pub fn vars(&self) -> SmallVec<[CounterVar; 4]> {
        match self {
            Counter::Clear(_) => SmallVec::new(),
            Counter::Cutting(c) => c.vars(),
            Counter::Stove(c) => c.vars(),
        }
    }

    fn holder(&self) -> &dyn ItemHolder {
        match self {
            Counter::Clear(c) => c,
            Counter::Cutting(c) => c,
            Counter::Stove(c) => c,
        }
    }

    fn holder_mut(&mut self) -> &mut dyn ItemHolder {
        match self {
            Counter::Clear(c) => c,
            Counter::Cutting(c) => c,
            Counter::Stove(c) => c,
        }
    }
}

impl ItemHolder for Counter {
    fn holder_id(&self) -> HolderId {
        self.holder().holder_id()
    }

    fn attach_point(&self) -> Vec3 {
        self.holder().attach_point()
    }

    fn held(&self) -> Option<HeldItem> {
        self.holder().held()
    }

    fn set_item(&mut self, item: HeldItem) {
        self.holder_mut().set_item(item);
    }

    fn clear_item(&mut self) {
        self.holder_mut().clear_item();
    }
}

impl From<ClearCounter> for Counter {
    fn from(counter: ClearCounter) -> Self {
        Counter::Clear(counter)
    }
}

impl From<CuttingCounter> for Counter {
    fn from(counter: CuttingCounter) -> Self {
        Counter::Cutting(counter)
    }
}

impl From<StoveCounter> for Counter {
    fn from(counter: StoveCounter) -> Self {
        Counter::Stove(counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemId;
    use crate::items::ItemTypeId;
    use crate::recipes::RecipeBook;

    #[test]
    fn test_dispatch_through_enum() {
        let mut counter = Counter::from(ClearCounter::new(CounterId(2), Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(counter.kind(), CounterKind::Clear);
        assert_eq!(counter.holder_id(), HolderId::Counter(CounterId(2)));
        assert!(!counter.has_item());

        counter.set_item(HeldItem {
            id: ItemId(7),
            item_type: ItemTypeId(1),
        });
        assert_eq!(counter.item(), Some(ItemId(7)));
        assert!(counter.drain_changes().is_empty());

        counter.clear_item();
        assert!(!counter.has_item());
    }

    #[test]
    fn test_vars_by_kind() {
        let cutting = Counter::from(CuttingCounter::new(CounterId(0), Vec3::ZERO, RecipeBook::new()));
        let stove = Counter::from(StoveCounter::new(
            CounterId(1),
            Vec3::ZERO,
            RecipeBook::new(),
            RecipeBook::new(),
        ));

        assert_eq!(cutting.vars().len(), 1);
        assert_eq!(stove.vars().len(), 5);
        assert!(stove.as_stove().is_some());
        assert!(stove.as_cutting().is_none());
    }
}
