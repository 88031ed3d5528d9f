//! A standard kitchen for tests, benches and headless hosts.

use crate::core::{CounterId, KitchenConfig, Vec2, Vec3};
use crate::items::{ItemCatalog, ItemType, ItemTypeId};
use crate::kitchen::Kitchen;
use crate::players::CounterLayout;
use crate::recipes::{BurnRecipe, CutRecipe, FryRecipe, RecipeBook};

/// Item types used by the standard kitchen.
pub mod food {
    use crate::items::ItemTypeId;

    pub const TOMATO: ItemTypeId = ItemTypeId::new(1);
    pub const TOMATO_SLICES: ItemTypeId = ItemTypeId::new(2);
    pub const CABBAGE: ItemTypeId = ItemTypeId::new(3);
    pub const CABBAGE_SLICES: ItemTypeId = ItemTypeId::new(4);
    pub const CHEESE: ItemTypeId = ItemTypeId::new(5);
    pub const CHEESE_SLICES: ItemTypeId = ItemTypeId::new(6);
    pub const PATTY_RAW: ItemTypeId = ItemTypeId::new(7);
    pub const PATTY_COOKED: ItemTypeId = ItemTypeId::new(8);
    pub const PATTY_BURNED: ItemTypeId = ItemTypeId::new(9);
    pub const BREAD: ItemTypeId = ItemTypeId::new(10);

    /// Types a dispenser hands out.
    pub const RAW: [ItemTypeId; 5] = [TOMATO, CABBAGE, CHEESE, PATTY_RAW, BREAD];
}

/// Footprint of one counter on the floor.
const COUNTER_HALF: Vec2 = Vec2::new(0.5, 0.5);
const TOP_HEIGHT: f32 = 1.0;

/// A row of counters along x with matching colliders.
///
/// ```text
///  z=1.5   [clear][clear][clear][cutting][stove]
///  x=       0      1      2      3        4
/// ```
#[derive(Clone, Debug)]
pub struct KitchenScenario {
    pub catalog: ItemCatalog,
    pub kitchen: Kitchen,
    pub layout: CounterLayout,
    pub clear_counters: Vec<CounterId>,
    pub cutting: CounterId,
    pub stove: CounterId,
}

impl KitchenScenario {
    /// Build the standard kitchen on the authority.
    #[must_use]
    pub fn standard(config: KitchenConfig) -> Self {
        let catalog = standard_catalog();
        let mut kitchen = Kitchen::host(config);
        let mut layout = CounterLayout::new();

        let mut clear_counters = Vec::new();
        for x in [0.0, 1.0, 2.0] {
            let (top, center) = slot(x);
            let id = kitchen.add_clear_counter(top);
            layout.add_counter(id, center, COUNTER_HALF);
            clear_counters.push(id);
        }

        let (top, center) = slot(3.0);
        let cutting = kitchen.add_cutting_counter(
            top,
            RecipeBook::new()
                .with(CutRecipe::with_default_threshold(food::TOMATO, food::TOMATO_SLICES))
                .with(CutRecipe::with_default_threshold(food::CABBAGE, food::CABBAGE_SLICES))
                .with(CutRecipe::new(food::CHEESE, food::CHEESE_SLICES, 5)),
        );
        layout.add_counter(cutting, center, COUNTER_HALF);

        let (top, center) = slot(4.0);
        let stove = kitchen.add_stove(
            top,
            RecipeBook::new().with(FryRecipe::with_default_threshold(food::PATTY_RAW, food::PATTY_COOKED)),
            RecipeBook::new().with(BurnRecipe::with_default_threshold(food::PATTY_COOKED, food::PATTY_BURNED)),
        );
        layout.add_counter(stove, center, COUNTER_HALF);

        Self {
            catalog,
            kitchen,
            layout,
            clear_counters,
            cutting,
            stove,
        }
    }

    /// Every counter id, clear counters first.
    #[must_use]
    pub fn counter_ids(&self) -> Vec<CounterId> {
        let mut ids = self.clear_counters.clone();
        ids.push(self.cutting);
        ids.push(self.stove);
        ids
    }

    /// Look up a type by display name.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<ItemTypeId> {
        self.catalog.by_name(name).map(|t| t.id)
    }
}

/// Counter top and collider center for the slot at `x`.
fn slot(x: f32) -> (Vec3, Vec2) {
    (Vec3::new(x, TOP_HEIGHT, 1.5), Vec2::new(x, 1.5))
}

fn standard_catalog() -> ItemCatalog {
    let mut catalog = ItemCatalog::new();
    for (id, name) in [
        (food::TOMATO, "Tomato"),
        (food::TOMATO_SLICES, "Tomato Slices"),
        (food::CABBAGE, "Cabbage"),
        (food::CABBAGE_SLICES, "Cabbage Slices"),
        (food::CHEESE, "Cheese Block"),
        (food::CHEESE_SLICES, "Cheese Slices"),
        (food::PATTY_RAW, "Meat Patty Uncooked"),
        (food::PATTY_COOKED, "Meat Patty Cooked"),
        (food::PATTY_BURNED, "Meat Patty Burned"),
        (food::BREAD, "Bread"),
    ] {
        catalog.register(ItemType::new(id, name));
    }
    catalog
}
