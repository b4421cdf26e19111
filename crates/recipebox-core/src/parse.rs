//! Freeform recipe text parser
//!
//! The text format is positional:
//!
//! ```text
//! Pancakes                      <- title
//! 4                             <- serving size
//! 200 g flour, 2 eggs (large)   <- ingredients, one line
//! Mix                           <- instructions, one step per line
//! Cook
//! ```

use crate::error::ParseError;
use crate::schema::{Ingredient, Recipe};

/// Units recognised after a leading quantity, lowercase and without a trailing period.
const UNITS: &[&str] = &[
    "bunch", "bunches", "can", "cans", "cl", "clove", "cloves", "cup", "cups", "dash", "dashes",
    "dl", "g", "gram", "grams", "handful", "handfuls", "kg", "kilogram", "kilograms", "l", "lb",
    "lbs", "liter", "liters", "litre", "litres", "mg", "milliliter", "milliliters", "millilitre",
    "millilitres", "ml", "ounce", "ounces", "oz", "pinch", "pinches", "pint", "pints", "pound",
    "pounds", "quart", "quarts", "slice", "slices", "sprig", "sprigs", "stick", "sticks",
    "tablespoon", "tablespoons", "tbsp", "teaspoon", "teaspoons", "tsp",
];

/// A recipe as read from the text format, before the ingredients line is split.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecipe {
    pub title: String,
    pub serving_size: u32,
    /// The ingredients line, verbatim.
    pub ingredients: String,
    pub instructions: Vec<String>,
}

impl ParsedRecipe {
    /// Build a structured [`Recipe`], splitting the ingredients line into entries.
    pub fn into_recipe(self) -> Recipe {
        let ingredients = split_ingredients(&self.ingredients);
        Recipe {
            title: self.title,
            instructions: self.instructions,
            ingredients,
            serving_size: self.serving_size,
        }
    }
}

/// Parse the positional text format.
pub fn parse(text: &str) -> Result<ParsedRecipe, ParseError> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() < 3 {
        return Err(ParseError::TooFewLines { found: lines.len() });
    }

    let raw_size = lines[1].trim();
    let size: i64 = raw_size.parse().map_err(|_| ParseError::InvalidServingSize {
        value: raw_size.to_string(),
    })?;
    if size < 1 {
        return Err(ParseError::NonPositiveServingSize { value: size });
    }
    let serving_size = u32::try_from(size).map_err(|_| ParseError::InvalidServingSize {
        value: raw_size.to_string(),
    })?;

    let instructions = lines[3..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok(ParsedRecipe {
        title: lines[0].to_string(),
        serving_size,
        ingredients: lines[2].to_string(),
        instructions,
    })
}

/// Split an ingredients line into structured entries.
///
/// Entries are comma-separated and read as `[quantity] [unit] name [(description)]`.
/// A unit written against the quantity (`200g`, `2box`) is taken as is; a
/// separate unit word must be one of the known kitchen units. A missing
/// quantity counts as 1.
pub fn split_ingredients(blob: &str) -> Vec<Ingredient> {
    blob.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Ingredient {
    let (rest, description) = split_description(entry);
    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    let mut quantity = None;
    let mut unit = None;

    if let Some(first) = tokens.first().copied() {
        if let Some(q) = parse_quantity(first) {
            quantity = Some(q);
            tokens.remove(0);
            // "1 1/2 cups"
            if let Some(frac) = tokens.first().filter(|t| t.contains('/')).and_then(|t| parse_quantity(t)) {
                quantity = Some(q + frac);
                tokens.remove(0);
            }
        } else if let Some((q, u)) = split_attached_unit(first) {
            // "200g flour", "2box cereal"
            quantity = Some(q);
            unit = Some(u.to_string());
            tokens.remove(0);
        }
    }

    if quantity.is_some() && unit.is_none() && tokens.len() > 1 && is_unit(tokens[0]) {
        unit = Some(tokens.remove(0).trim_end_matches('.').to_string());
        if tokens.len() > 1 && tokens[0].eq_ignore_ascii_case("of") {
            tokens.remove(0);
        }
    }

    // A bare number has nothing to quantify.
    if tokens.is_empty() {
        return Ingredient {
            name: rest.to_string(),
            quantity: 1.0,
            unit: None,
            description,
        };
    }

    Ingredient {
        name: tokens.join(" "),
        quantity: quantity.unwrap_or(1.0),
        unit,
        description,
    }
}

fn split_description(entry: &str) -> (&str, Option<String>) {
    if let Some(inner) = entry.strip_suffix(')') {
        if let Some(open) = inner.rfind('(') {
            let description = inner[open + 1..].trim();
            let rest = inner[..open].trim();
            if !rest.is_empty() {
                let description = (!description.is_empty()).then(|| description.to_string());
                return (rest, description);
            }
        }
    }
    (entry, None)
}

fn parse_quantity(token: &str) -> Option<f64> {
    let value = match token.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => token.parse().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn split_attached_unit(token: &str) -> Option<(f64, &str)> {
    let split = token.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (number, unit) = token.split_at(split);
    if number.is_empty() || unit.starts_with('/') {
        return None;
    }
    Some((parse_quantity(number)?, unit))
}

fn is_unit(token: &str) -> bool {
    let normalized = token.trim_end_matches('.').to_ascii_lowercase();
    UNITS.binary_search(&normalized.as_str()).is_ok()
}

/// Write a recipe back into the positional text format.
pub fn render_text(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(render_ingredient)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        recipe.title.clone(),
        recipe.serving_size.to_string(),
        ingredients,
    ];
    lines.extend(recipe.instructions.iter().cloned());
    lines.join("\n")
}

fn render_ingredient(ingredient: &Ingredient) -> String {
    // The unit is written against the quantity so that any unit reads back.
    let mut out = ingredient.quantity.to_string();
    if let Some(unit) = &ingredient.unit {
        out.push_str(unit);
    }
    out.push(' ');
    out.push_str(&ingredient.name);
    if let Some(description) = &ingredient.description {
        out.push_str(" (");
        out.push_str(description);
        out.push(')');
    }
    out
}
