use crate::domain::model::{Recipe, RecipeDraft, RecipePreview};
use crate::domain::ports::{ConfigProvider, RecipeApi};
use crate::utils::error::{RecipeError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://forkify-api.herokuapp.com/api/v2/recipes/";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct RecipeData {
    recipe: Recipe,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    recipes: Vec<RecipePreview>,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    message: String,
}

/// Client for the forkify v2 recipe API.
#[derive(Debug, Clone)]
pub struct ForkifyClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl ForkifyClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        // searches and uploads go to the collection path with its trailing slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let invalid = |reason: String| RecipeError::InvalidConfigValueError {
            field: "api.url".to_string(),
            value: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL has no path to append recipe ids to".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_url(),
            config.api_key().map(str::to_string),
            config.timeout(),
        )
    }

    /// Appends `id` as a single percent-encoded path segment, so an id can
    /// never change the host or leave the collection path.
    fn recipe_url(&self, id: &str) -> Result<Url> {
        if matches!(id, "" | "." | "..") {
            return Err(RecipeError::validation(format!("Invalid recipe id '{}'", id)));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RecipeError::validation(format!("Cannot append id to {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> RecipeError {
        if error.is_timeout() {
            RecipeError::TimeoutError {
                seconds: self.timeout.as_secs(),
            }
        } else {
            RecipeError::HttpError(error)
        }
    }

    /// Sends the request and returns the raw body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = self
            .with_key(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<FailureBody>(&body)
                .map(|failure| failure.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(RecipeError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl RecipeApi for ForkifyClient {
    async fn fetch_recipe(&self, id: &str) -> Result<Recipe> {
        let url = self.recipe_url(id)?;
        tracing::debug!("GET {}", url);
        let data: RecipeData = self.send_json(self.client.get(url)).await?;
        Ok(data.recipe)
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipePreview>> {
        tracing::debug!("GET {}?search={}", self.base_url, query);
        let request = self
            .client
            .get(self.base_url.clone())
            .query(&[("search", query)]);
        let data: SearchData = self.send_json(request).await?;
        Ok(data.recipes)
    }

    async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        tracing::debug!("POST {} ({})", self.base_url, draft.title);
        let request = self.client.post(self.base_url.clone()).json(draft);
        let data: RecipeData = self.send_json(request).await?;
        Ok(data.recipe)
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        let url = self.recipe_url(id)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
