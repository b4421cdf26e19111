//! Recipe validation

use crate::schema::Recipe;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Recipe title cannot be empty")]
    EmptyTitle,

    #[error("Serving size must be at least 1")]
    ZeroServingSize,

    #[error("Ingredient #{0} must have a name")]
    EmptyIngredientName(usize),

    #[error("Ingredient '{name}' has invalid quantity {quantity}")]
    InvalidQuantity { name: String, quantity: f64 },
}

/// Validate a recipe, collecting every problem found.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if recipe.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }

    if recipe.serving_size == 0 {
        errors.push(ValidationError::ZeroServingSize);
    }

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            errors.push(ValidationError::EmptyIngredientName(index + 1));
        }
        if !ingredient.quantity.is_finite() || ingredient.quantity < 0.0 {
            errors.push(ValidationError::InvalidQuantity {
                name: ingredient.name.clone(),
                quantity: ingredient.quantity,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
