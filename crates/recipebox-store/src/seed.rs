//! Loading initial recipes from a JSON file at start-up.

use anyhow::{bail, Context, Result};
use recipebox_core::{validate_recipe, Recipe};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a JSON array of recipes, rejecting the file if any recipe is invalid.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Recipe>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {:?}", path))?;
    let recipes: Vec<Recipe> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid seed file {:?}", path))?;

    for (index, recipe) in recipes.iter().enumerate() {
        if let Err(errors) = validate_recipe(recipe) {
            let error_msg = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
            bail!("Invalid recipe #{} in {:?}: {}", index + 1, path, error_msg);
        }
    }

    info!("Loaded {} recipes from {:?}", recipes.len(), path);
    Ok(recipes)
}
