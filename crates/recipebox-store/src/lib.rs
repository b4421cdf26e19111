//! Recipebox Store - persistence collaborator for recipe records
//!
//! Handlers receive the store as an injected `Arc<dyn RecipeStore>`; there is
//! no process-wide instance.

pub mod error;
pub mod memory;
pub mod seed;

use recipebox_core::{Recipe, RecipeId, StoredRecipe};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use seed::load_seed;

/// Recipe records keyed by identifier.
pub trait RecipeStore: Send + Sync {
    /// All records, ordered by id.
    fn list(&self) -> Vec<StoredRecipe>;

    fn get(&self, id: RecipeId) -> Option<Recipe>;

    /// Insert a new record and return its id.
    fn create(&self, recipe: Recipe) -> RecipeId;

    /// Replace an existing record wholesale.
    fn put(&self, id: RecipeId, recipe: Recipe) -> Result<(), StoreError>;

    fn delete(&self, id: RecipeId) -> Result<(), StoreError>;
}
