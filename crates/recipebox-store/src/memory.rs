//! In-memory recipe store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use recipebox_core::{Recipe, RecipeId, StoredRecipe};
use tracing::debug;

use crate::{RecipeStore, StoreError};

/// Recipe store held in process memory.
///
/// Ids start at 1 and are never reused, even after a delete.
pub struct MemoryStore {
    recipes: RwLock<BTreeMap<RecipeId, Recipe>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store pre-populated with `recipes`, assigned ids 1..=n in order.
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let store = Self::new();
        for recipe in recipes {
            store.create(recipe);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.recipes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for MemoryStore {
    fn list(&self) -> Vec<StoredRecipe> {
        let recipes = self.recipes.read().unwrap_or_else(PoisonError::into_inner);
        recipes
            .iter()
            .map(|(id, recipe)| StoredRecipe {
                id: *id,
                recipe: recipe.clone(),
            })
            .collect()
    }

    fn get(&self, id: RecipeId) -> Option<Recipe> {
        let recipes = self.recipes.read().unwrap_or_else(PoisonError::into_inner);
        recipes.get(&id).cloned()
    }

    fn create(&self, recipe: Recipe) -> RecipeId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut recipes = self.recipes.write().unwrap_or_else(PoisonError::into_inner);
        recipes.insert(id, recipe);
        debug!("Stored recipe {}", id);
        id
    }

    fn put(&self, id: RecipeId, recipe: Recipe) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().unwrap_or_else(PoisonError::into_inner);
        match recipes.get_mut(&id) {
            Some(existing) => {
                *existing = recipe;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn delete(&self, id: RecipeId) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().unwrap_or_else(PoisonError::into_inner);
        recipes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
