//! Recipe catalog: cut, fry and burn transformations.
//!
//! Recipes are loaded once and never mutated. Each transforming counter
//! receives its own [`RecipeBook`] holding only the recipes it can run.

mod book;
mod recipe;

pub use book::RecipeBook;
pub use recipe::{Burn, BurnRecipe, Cut, CutRecipe, Fry, FryRecipe, Recipe, RecipeKind};
