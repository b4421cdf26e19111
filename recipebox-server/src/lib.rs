//! Recipebox Server - JSON CRUD API for recipe records

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use recipebox_core::{scale, validate_recipe, Recipe, RecipeId, StoredRecipe};
use recipebox_store::{RecipeStore, StoreError};

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
}

/// Build the API router around an injected store.
pub fn router(store: Arc<dyn RecipeStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(health_check))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/:id/scale", get(scale_recipe))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: RecipeId,
    pub message: String,
}

fn not_found(err: StoreError) -> (StatusCode, String) {
    warn!("{}", err);
    (StatusCode::NOT_FOUND, "Recipe not found".to_string())
}

fn check_recipe(recipe: &Recipe) -> Result<(), (StatusCode, String)> {
    validate_recipe(recipe).map_err(|errors| {
        let error_msg = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
        warn!("Rejected recipe: {}", error_msg);
        (StatusCode::BAD_REQUEST, format!("Invalid recipe: {}", error_msg))
    })
}

// === Recipe Endpoints ===

async fn list_recipes(State(state): State<Arc<AppState>>) -> Json<Vec<StoredRecipe>> {
    Json(state.store.list())
}

async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecipeId>,
) -> Result<Json<StoredRecipe>, (StatusCode, String)> {
    let recipe = state
        .store
        .get(id)
        .ok_or(StoreError::NotFound(id))
        .map_err(not_found)?;

    Ok(Json(StoredRecipe { id, recipe }))
}

async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Json(recipe): Json<Recipe>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    check_recipe(&recipe)?;

    let title = recipe.title.clone();
    let id = state.store.create(recipe);
    info!("Created recipe {} ('{}')", id, title);

    Ok(Json(MessageResponse {
        id,
        message: "Recipe created successfully".to_string(),
    }))
}

async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecipeId>,
    Json(recipe): Json<Recipe>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    check_recipe(&recipe)?;

    state.store.put(id, recipe).map_err(not_found)?;
    info!("Recipe with ID {} updated successfully", id);

    Ok(Json(MessageResponse {
        id,
        message: "Recipe updated successfully".to_string(),
    }))
}

async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecipeId>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    state.store.delete(id).map_err(not_found)?;
    info!("Recipe with ID {} deleted", id);

    Ok(Json(MessageResponse {
        id,
        message: "Recipe deleted successfully".to_string(),
    }))
}

#[derive(Deserialize)]
struct ScaleParams {
    servings: i64,
}

// GET /recipes/:id/scale?servings=6
async fn scale_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecipeId>,
    Query(params): Query<ScaleParams>,
) -> Result<Json<StoredRecipe>, (StatusCode, String)> {
    let recipe = state
        .store
        .get(id)
        .ok_or(StoreError::NotFound(id))
        .map_err(not_found)?;

    let scaled = scale(recipe, params.servings).map_err(|e| {
        warn!("Failed to scale recipe {}: {}", id, e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(StoredRecipe { id, recipe: scaled }))
}
