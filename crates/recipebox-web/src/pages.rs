//! Page handlers. Each one maps form input onto the API client and the core
//! transformations and renders the outcome.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use recipebox_core::{parse, render_text, scale, RecipeId, StoredRecipe};

use crate::client::{ApiClient, ClientError};
use crate::render::{self, Notice};

/// State shared across page handlers
pub struct WebState {
    pub api: ApiClient,
}

/// Build the pages router.
pub fn router(api: ApiClient) -> Router {
    let state = Arc::new(WebState { api });

    Router::new()
        .route("/", get(home))
        .route("/recipes", get(view_all_recipes))
        .route("/recipes/:id", get(view_recipe).post(scale_recipe))
        .route("/recipes/:id/edit", get(edit_recipe_form).post(edit_recipe))
        .route("/recipes/:id/delete", get(delete_recipe_form).post(delete_recipe))
        .route("/create", get(create_recipe_form).post(create_recipe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
struct ScaleForm {
    new_serving_size: Option<String>,
}

#[derive(Deserialize)]
struct RecipeTextForm {
    #[serde(default)]
    input_field: String,
}

/// Fetch a recipe, turning API failures into the page to show instead.
async fn fetch_recipe(state: &WebState, id: RecipeId) -> Result<StoredRecipe, Response> {
    state.api.get_recipe(id).await.map_err(|e| {
        if e.is_not_found() {
            warn!("Recipe {} not found", id);
            (StatusCode::NOT_FOUND, Html(render::not_found_page(id))).into_response()
        } else {
            error!("Failed to load recipe {}: {}", id, e);
            (StatusCode::BAD_GATEWAY, Html(render::unavailable_page())).into_response()
        }
    })
}

/// Target serving size from the form; absent or unparseable input means 1.
fn requested_serving_size(form: &ScaleForm) -> i64 {
    form.new_serving_size
        .as_deref()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(1)
}

async fn home() -> Html<String> {
    info!("Loading home page");
    Html(render::home_page())
}

async fn view_all_recipes(State(state): State<Arc<WebState>>) -> Html<String> {
    let recipes = state.api.list_recipes().await.unwrap_or_else(|e| {
        warn!("Failed to list recipes: {}", e);
        Vec::new()
    });
    info!("Loading view_all_recipes page");
    Html(render::recipe_list_page(&recipes))
}

async fn view_recipe(State(state): State<Arc<WebState>>, Path(id): Path<RecipeId>) -> Response {
    match fetch_recipe(&state, id).await {
        Ok(stored) => Html(render::recipe_page(&stored, None)).into_response(),
        Err(page) => page,
    }
}

async fn scale_recipe(
    State(state): State<Arc<WebState>>,
    Path(id): Path<RecipeId>,
    Form(form): Form<ScaleForm>,
) -> Response {
    let stored = match fetch_recipe(&state, id).await {
        Ok(stored) => stored,
        Err(page) => return page,
    };

    let target = requested_serving_size(&form);
    match scale(stored.recipe.clone(), target) {
        Ok(recipe) => {
            info!("Scaled recipe {} to {} servings", id, target);
            Html(render::recipe_page(&StoredRecipe { id, recipe }, None)).into_response()
        }
        Err(e) => {
            warn!("Failed to scale recipe {}: {}", id, e);
            let notice = Notice::error("Serving size must be a positive whole number.");
            Html(render::recipe_page(&stored, Some(&notice))).into_response()
        }
    }
}

async fn create_recipe_form() -> Html<String> {
    Html(render::create_page("", None))
}

async fn create_recipe(
    State(state): State<Arc<WebState>>,
    Form(form): Form<RecipeTextForm>,
) -> Html<String> {
    let notice = match parse(&form.input_field) {
        Ok(parsed) => match state.api.create_recipe(&parsed.into_recipe()).await {
            Ok(id) => {
                info!("Created recipe {}", id);
                Notice::success(format!("Recipe created as #{}.", id))
            }
            Err(e) => {
                error!("Failed to create recipe: {}", e);
                Notice::error("Recipe creation failed, please try again.")
            }
        },
        Err(e) => {
            error!("Error processing recipe data: {}", e);
            Notice::error("Recipe creation failed, please try again.")
        }
    };

    Html(render::create_page(&form.input_field, Some(&notice)))
}

async fn edit_recipe_form(State(state): State<Arc<WebState>>, Path(id): Path<RecipeId>) -> Response {
    match fetch_recipe(&state, id).await {
        Ok(stored) => {
            let input_field = render_text(&stored.recipe);
            Html(render::edit_page(id, Some(&stored), &input_field, None)).into_response()
        }
        Err(page) => page,
    }
}

async fn edit_recipe(
    State(state): State<Arc<WebState>>,
    Path(id): Path<RecipeId>,
    Form(form): Form<RecipeTextForm>,
) -> Html<String> {
    let result = match parse(&form.input_field) {
        Ok(parsed) => state
            .api
            .update_recipe(id, &parsed.into_recipe())
            .await
            .map_err(|e| error!("Failed to update recipe {}: {}", id, e)),
        Err(e) => {
            error!("Error processing recipe data: {}", e);
            Err(())
        }
    };
    let notice = match result {
        Ok(()) => {
            info!("Recipe {} updated", id);
            Notice::success("Recipe updated.")
        }
        Err(()) => Notice::error("Recipe edit failed, please try again."),
    };

    let current = state.api.get_recipe(id).await.ok();
    Html(render::edit_page(id, current.as_ref(), &form.input_field, Some(&notice)))
}

async fn delete_recipe_form(Path(id): Path<RecipeId>) -> Html<String> {
    Html(render::delete_page(id, false, None))
}

async fn delete_recipe(State(state): State<Arc<WebState>>, Path(id): Path<RecipeId>) -> Html<String> {
    match state.api.delete_recipe(id).await {
        Ok(()) => {
            info!("Recipe {} deleted", id);
            Html(render::delete_page(id, true, Some(&Notice::success("Recipe deleted."))))
        }
        Err(e) => {
            log_delete_failure(id, &e);
            let notice = Notice::error("Failed to delete the recipe, please try again.");
            Html(render::delete_page(id, false, Some(&notice)))
        }
    }
}

fn log_delete_failure(id: RecipeId, e: &ClientError) {
    if e.is_not_found() {
        warn!("Recipe {} not found for deletion", id);
    } else {
        error!("Failed to delete recipe {}: {}", id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use recipebox_core::{Ingredient, Recipe};
    use recipebox_store::{MemoryStore, RecipeStore};
    use tower::ServiceExt;

    fn pancakes() -> Recipe {
        Recipe {
            title: "Pancakes".to_string(),
            instructions: vec!["Mix".to_string(), "Cook".to_string()],
            ingredients: vec![
                Ingredient::new("flour", 200.0).with_unit("g"),
                Ingredient::new("eggs", 2.0).with_description("large"),
            ],
            serving_size: 4,
        }
    }

    /// Start the API on an ephemeral port and return the pages router pointed at it.
    async fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_recipes(vec![pancakes()]));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let api = recipebox_server::router(store.clone());
        tokio::spawn(async move {
            axum::serve(listener, api).await.unwrap();
        });

        let client = ApiClient::new(&format!("http://{}/", addr)).unwrap();
        (router(client), store)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, String) {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn serving_size_defaults_to_one() {
        let form = |v: Option<&str>| ScaleForm {
            new_serving_size: v.map(str::to_string),
        };
        assert_eq!(requested_serving_size(&form(None)), 1);
        assert_eq!(requested_serving_size(&form(Some("abc"))), 1);
        assert_eq!(requested_serving_size(&form(Some(" 6 "))), 6);
        assert_eq!(requested_serving_size(&form(Some("-2"))), -2);
    }

    #[tokio::test]
    async fn home_page_renders() {
        let (app, _) = test_app().await;
        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Recipebox"));
    }

    #[tokio::test]
    async fn list_page_shows_recipes() {
        let (app, _) = test_app().await;
        let (status, body) = get(app, "/recipes").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/recipes/1">Pancakes</a>"#));
    }

    #[tokio::test]
    async fn list_page_survives_unreachable_api() {
        let app = router(ApiClient::new("http://127.0.0.1:1/").unwrap());
        let (status, body) = get(app, "/recipes").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No recipes yet."));
    }

    #[tokio::test]
    async fn recipe_page_shows_ingredients() {
        let (app, _) = test_app().await;
        let (status, body) = get(app, "/recipes/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<li>200 g flour</li>"));
        assert!(body.contains("<em>(large)</em>"));
        assert!(body.contains("<li>Mix</li>"));
    }

    #[tokio::test]
    async fn missing_recipe_page_is_404() {
        let (app, _) = test_app().await;
        let (status, body) = get(app, "/recipes/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Recipe not found"));
    }

    #[tokio::test]
    async fn scaling_doubles_quantities_without_saving() {
        let (app, store) = test_app().await;
        let (status, body) = post_form(app, "/recipes/1", &[("new_serving_size", "8")]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Serves 8"));
        assert!(body.contains("<li>400 g flour</li>"));
        assert_eq!(store.get(1).unwrap().serving_size, 4);
    }

    #[tokio::test]
    async fn scaling_with_unparseable_size_uses_one() {
        let (app, _) = test_app().await;
        let (_, body) = post_form(app, "/recipes/1", &[("new_serving_size", "lots")]).await;
        assert!(body.contains("Serves 1"));
        assert!(body.contains("<li>50 g flour</li>"));
    }

    #[tokio::test]
    async fn scaling_to_zero_shows_error() {
        let (app, _) = test_app().await;
        let (status, body) = post_form(app, "/recipes/1", &[("new_serving_size", "0")]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Serving size must be a positive whole number."));
        assert!(body.contains("Serves 4"));
    }

    #[tokio::test]
    async fn create_posts_parsed_recipe() {
        let (app, store) = test_app().await;
        let text = "Omelette\n1\n3 eggs, 10 g butter\nWhisk\nFry";
        let (status, body) = post_form(app, "/create", &[("input_field", text)]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Recipe created as #2."));

        let created = store.get(2).unwrap();
        assert_eq!(created.title, "Omelette");
        assert_eq!(created.ingredients[1], Ingredient::new("butter", 10.0).with_unit("g"));
        assert_eq!(created.instructions, vec!["Whisk", "Fry"]);
    }

    #[tokio::test]
    async fn create_with_bad_text_fails_and_echoes_input() {
        let (app, store) = test_app().await;
        let text = "Omelette\nfour\n<eggs>";
        let (_, body) = post_form(app, "/create", &[("input_field", text)]).await;
        assert!(body.contains("Recipe creation failed, please try again."));
        assert!(body.contains("&lt;eggs&gt;"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn create_rejected_by_api_fails() {
        let (app, store) = test_app().await;
        // Blank title parses but does not validate.
        let (_, body) = post_form(app, "/create", &[("input_field", " \n2\nwater")]).await;
        assert!(body.contains("Recipe creation failed, please try again."));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let (app, _) = test_app().await;
        let (status, body) = get(app, "/recipes/1/edit").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("200g flour, 2 eggs (large)"));
    }

    #[tokio::test]
    async fn edit_updates_recipe() {
        let (app, store) = test_app().await;
        let text = "Crepes\n2\n100 g flour\nWhisk";
        let (_, body) = post_form(app, "/recipes/1/edit", &[("input_field", text)]).await;
        assert!(body.contains("Recipe updated."));
        let updated = store.get(1).unwrap();
        assert_eq!(updated.title, "Crepes");
        assert_eq!(updated.serving_size, 2);
    }

    #[tokio::test]
    async fn edit_missing_recipe_fails() {
        let (app, _) = test_app().await;
        let text = "Crepes\n2\n100 g flour";
        let (_, body) = post_form(app, "/recipes/9/edit", &[("input_field", text)]).await;
        assert!(body.contains("Recipe edit failed, please try again."));
    }

    #[tokio::test]
    async fn delete_removes_recipe_once() {
        let (app, store) = test_app().await;
        let (_, body) = post_form(app.clone(), "/recipes/1/delete", &[]).await;
        assert!(body.contains("Recipe deleted."));
        assert!(store.get(1).is_none());

        let (_, body) = post_form(app, "/recipes/1/delete", &[]).await;
        assert!(body.contains("Failed to delete the recipe, please try again."));
    }

    #[tokio::test]
    async fn delete_confirmation_page() {
        let (app, store) = test_app().await;
        let (status, body) = get(app, "/recipes/1/delete").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"action="/recipes/1/delete""#));
        assert!(store.get(1).is_some());
    }
}
