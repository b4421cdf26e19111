//! Proportional scaling of ingredient quantities.

use crate::error::RecipeError;
use crate::schema::Recipe;

/// Scale every ingredient quantity of `recipe` to serve `new_serving_size`.
///
/// Quantities are multiplied by `new_serving_size / recipe.serving_size`;
/// names, units, descriptions and ingredient order are left as they are.
pub fn scale(mut recipe: Recipe, new_serving_size: i64) -> Result<Recipe, RecipeError> {
    if recipe.serving_size == 0 {
        return Err(RecipeError::ZeroServingSize);
    }
    if new_serving_size <= 0 {
        return Err(RecipeError::InvalidServingSize(new_serving_size));
    }
    let target = u32::try_from(new_serving_size)
        .map_err(|_| RecipeError::InvalidServingSize(new_serving_size))?;

    let factor = f64::from(target) / f64::from(recipe.serving_size);
    for ingredient in &mut recipe.ingredients {
        let scaled = ingredient.quantity * factor;
        if !scaled.is_finite() {
            return Err(RecipeError::NonFiniteQuantity {
                ingredient: ingredient.name.clone(),
            });
        }
        ingredient.quantity = scaled;
    }
    recipe.serving_size = target;

    Ok(recipe)
}
