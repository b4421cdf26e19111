//! HTTP client for the recipe API.

use recipebox_core::{Recipe, RecipeId, StoredRecipe};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {0}")]
    Status(StatusCode),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status(StatusCode::NOT_FOUND))
    }
}

#[derive(Deserialize)]
struct Created {
    id: RecipeId,
}

/// Client for the `/recipes` endpoints of the API server.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn recipe_url(&self, id: Option<RecipeId>) -> Result<Url, ClientError> {
        let path = match id {
            Some(id) => format!("recipes/{}", id),
            None => "recipes/".to_string(),
        };
        Ok(self.base_url.join(&path)?)
    }

    async fn send(&self, method: &str, url: &Url, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            error!("Error during {} request to {}: {}", method, url, e);
            ClientError::Request(e)
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status(status))
        }
    }

    pub async fn list_recipes(&self) -> Result<Vec<StoredRecipe>, ClientError> {
        let url = self.recipe_url(None)?;
        let response = self.send("GET", &url, self.http.get(url.clone())).await?;
        Ok(response.json().await?)
    }

    pub async fn get_recipe(&self, id: RecipeId) -> Result<StoredRecipe, ClientError> {
        let url = self.recipe_url(Some(id))?;
        let response = self.send("GET", &url, self.http.get(url.clone())).await?;
        Ok(response.json().await?)
    }

    pub async fn create_recipe(&self, recipe: &Recipe) -> Result<RecipeId, ClientError> {
        let url = self.recipe_url(None)?;
        let response = self
            .send("POST", &url, self.http.post(url.clone()).json(recipe))
            .await?;
        let created: Created = response.json().await?;
        Ok(created.id)
    }

    pub async fn update_recipe(&self, id: RecipeId, recipe: &Recipe) -> Result<(), ClientError> {
        let url = self.recipe_url(Some(id))?;
        self.send("PUT", &url, self.http.put(url.clone()).json(recipe))
            .await?;
        Ok(())
    }

    pub async fn delete_recipe(&self, id: RecipeId) -> Result<(), ClientError> {
        let url = self.recipe_url(Some(id))?;
        self.send("DELETE", &url, self.http.delete(url.clone())).await?;
        Ok(())
    }
}
