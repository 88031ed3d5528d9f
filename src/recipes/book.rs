//! Per-counter recipe lists.

use serde::{Deserialize, Serialize};

use super::recipe::{Recipe, RecipeKind};
use crate::items::ItemTypeId;

/// The handful of recipes one counter knows about.
///
/// Lookup is a linear scan by input type. Counters only carry the few
/// recipes relevant to them, so a map would buy nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RecipeBook<K: RecipeKind> {
    recipes: Vec<Recipe<K>>,
}

impl<K: RecipeKind> Default for RecipeBook<K> {
    fn default() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }
}

impl<K: RecipeKind> RecipeBook<K> {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe (builder pattern).
    #[must_use]
    pub fn with(mut self, recipe: Recipe<K>) -> Self {
        self.push(recipe);
        self
    }

    /// Add a recipe.
    pub fn push(&mut self, recipe: Recipe<K>) {
        self.recipes.push(recipe);
    }

    /// First recipe whose input matches.
    #[must_use]
    pub fn find(&self, input: ItemTypeId) -> Option<&Recipe<K>> {
        self.recipes.iter().find(|r| r.input == input)
    }

    /// Check whether any recipe accepts `input`.
    #[must_use]
    pub fn accepts(&self, input: ItemTypeId) -> bool {
        self.find(input).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe<K>> {
        self.recipes.iter()
    }
}

impl<K: RecipeKind> FromIterator<Recipe<K>> for RecipeBook<K> {
    fn from_iter<I: IntoIterator<Item = Recipe<K>>>(iter: I) -> Self {
        Self {
            recipes: iter.into_iter().collect(),
        }
    }
}
