//! Recipebox Core - recipe model and transformations
//!
//! This crate defines the recipe data model and the two pure transformations
//! the rest of the workspace builds on: proportional scaling to a new serving
//! size, and parsing of the positional freeform text format.

pub mod error;
pub mod parse;
pub mod scale;
pub mod schema;
pub mod validation;

pub use error::{ErrorKind, ParseError, RecipeError};
pub use parse::{parse, render_text, split_ingredients, ParsedRecipe};
pub use scale::scale;
pub use schema::{Ingredient, Recipe, RecipeId, StoredRecipe};
pub use validation::{validate_recipe, ValidationError};
