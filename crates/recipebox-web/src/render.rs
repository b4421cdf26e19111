//! HTML rendering for the recipe pages.

use html_escape::{encode_double_quoted_attribute, encode_text};
use recipebox_core::{Ingredient, RecipeId, StoredRecipe};

/// A one-off message shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }
}

const TEXT_FORMAT_HELP: &str = "Line 1: title. Line 2: number of servings. \
Line 3: ingredients, separated by commas (e.g. <code>200 g flour, 2 eggs (large)</code>). \
Following lines: one instruction step per line.";

fn layout(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let notice = match notice {
        Some(Notice::Success(msg)) => format!(r#"<p class="notice success">{}</p>"#, encode_text(msg)),
        Some(Notice::Error(msg)) => format!(r#"<p class="notice error">{}</p>"#, encode_text(msg)),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - Recipebox</title></head>
<body>
<nav><a href="/">Home</a> | <a href="/recipes">All recipes</a> | <a href="/create">New recipe</a></nav>
<main>
<h1>{title}</h1>
{notice}
{body}
</main>
</body>
</html>
"#,
        title = encode_text(title),
    )
}

/// Render a quantity with at most two decimals, or two significant digits when
/// it is smaller than 0.01.
pub fn format_quantity(quantity: f64) -> String {
    let magnitude = quantity.abs();
    let decimals = if magnitude > 0.0 && magnitude < 0.01 {
        (-magnitude.log10()).floor() as usize + 2
    } else {
        2
    };
    let text = format!("{:.*}", decimals, quantity);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn ingredient_item(ingredient: &Ingredient) -> String {
    let mut line = format_quantity(ingredient.quantity);
    if let Some(unit) = &ingredient.unit {
        line.push(' ');
        line.push_str(&encode_text(unit));
    }
    line.push(' ');
    line.push_str(&encode_text(&ingredient.name));
    if let Some(description) = &ingredient.description {
        line.push_str(&format!(" <em>({})</em>", encode_text(description)));
    }
    format!("<li>{}</li>", line)
}

fn text_form(action: &str, input_field: &str, submit: &str) -> String {
    format!(
        r#"<p>{help}</p>
<form method="post" action="{action}">
<textarea name="input_field" rows="12" cols="60">{input}</textarea>
<button type="submit">{submit}</button>
</form>"#,
        help = TEXT_FORMAT_HELP,
        action = encode_double_quoted_attribute(action),
        input = encode_text(input_field),
    )
}

pub fn home_page() -> String {
    layout(
        "Recipebox",
        None,
        r#"<p>Store your recipes and scale them to any number of servings.</p>
<ul><li><a href="/recipes">Browse recipes</a></li><li><a href="/create">Add a recipe</a></li></ul>"#,
    )
}

pub fn recipe_list_page(recipes: &[StoredRecipe]) -> String {
    let body = if recipes.is_empty() {
        "<p>No recipes yet.</p>".to_string()
    } else {
        let items: String = recipes
            .iter()
            .map(|r| {
                format!(
                    r#"<li><a href="/recipes/{}">{}</a> (serves {})</li>"#,
                    r.id,
                    encode_text(&r.recipe.title),
                    r.recipe.serving_size
                )
            })
            .collect();
        format!("<ul>{}</ul>", items)
    };
    layout("All recipes", None, &body)
}

pub fn recipe_page(stored: &StoredRecipe, notice: Option<&Notice>) -> String {
    let recipe = &stored.recipe;
    let ingredients: String = recipe.ingredients.iter().map(ingredient_item).collect();
    let steps: String = recipe
        .instructions
        .iter()
        .map(|step| format!("<li>{}</li>", encode_text(step)))
        .collect();

    let body = format!(
        r#"<p>Serves {servings}</p>
<form method="post" action="/recipes/{id}">
<label>Scale to <input type="number" name="new_serving_size" min="1" value="{servings}"> servings</label>
<button type="submit">Scale</button>
</form>
<h2>Ingredients</h2>
<ul>{ingredients}</ul>
<h2>Instructions</h2>
<ol>{steps}</ol>
<p><a href="/recipes/{id}/edit">Edit</a> | <a href="/recipes/{id}/delete">Delete</a></p>"#,
        servings = recipe.serving_size,
        id = stored.id,
    );
    layout(&recipe.title, notice, &body)
}

pub fn create_page(input_field: &str, notice: Option<&Notice>) -> String {
    layout(
        "New recipe",
        notice,
        &text_form("/create", input_field, "Create"),
    )
}

pub fn edit_page(id: RecipeId, current: Option<&StoredRecipe>, input_field: &str, notice: Option<&Notice>) -> String {
    let title = match current {
        Some(stored) => format!("Edit {}", stored.recipe.title),
        None => "Edit recipe".to_string(),
    };
    let body = format!(
        r#"{form}
<p><a href="/recipes/{id}">Back to recipe</a></p>"#,
        form = text_form(&format!("/recipes/{}/edit", id), input_field, "Save"),
    );
    layout(&title, notice, &body)
}

pub fn delete_page(id: RecipeId, deleted: bool, notice: Option<&Notice>) -> String {
    let body = if deleted {
        r#"<p><a href="/recipes">Back to all recipes</a></p>"#.to_string()
    } else {
        format!(
            r#"<p>Delete recipe {id}? This cannot be undone.</p>
<form method="post" action="/recipes/{id}/delete"><button type="submit">Delete</button></form>
<p><a href="/recipes/{id}">Cancel</a></p>"#
        )
    };
    layout("Delete recipe", notice, &body)
}

pub fn not_found_page(id: RecipeId) -> String {
    layout(
        "Recipe not found",
        None,
        &format!(r#"<p>There is no recipe {}. <a href="/recipes">Back to all recipes</a></p>"#, id),
    )
}

pub fn unavailable_page() -> String {
    layout(
        "Recipe unavailable",
        Some(&Notice::error("The recipe service could not be reached, please try again.")),
        "",
    )
}
