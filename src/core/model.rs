use crate::core::sequence::RequestSequence;
use crate::domain::model::{NewRecipe, Recipe, RecipePreview, SearchState};
use crate::domain::ports::{RecipeApi, Storage};
use crate::domain::state::AppState;
use crate::utils::error::{RecipeError, Result};
use crate::utils::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Result of a request that may have been overtaken by a newer one.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Applied(T),
    /// A newer request of the same kind started while this one was in
    /// flight; the response was dropped and state left untouched.
    Discarded,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookmarkFile {
    saved_at: DateTime<Utc>,
    bookmarks: Vec<Recipe>,
}

/// Owns the application state and the recipe API. All state changes go
/// through this type; the lock is never held across an await.
pub struct RecipeModel<A: RecipeApi, S: Storage> {
    api: A,
    storage: S,
    state: Mutex<AppState>,
    recipe_requests: RequestSequence,
    search_requests: RequestSequence,
}

impl<A: RecipeApi, S: Storage> RecipeModel<A, S> {
    pub fn new(api: A, storage: S, results_per_page: usize) -> Self {
        let model = Self {
            api,
            storage,
            state: Mutex::new(AppState::new(results_per_page)),
            recipe_requests: RequestSequence::new(),
            search_requests: RequestSequence::new(),
        };
        model.restore_bookmarks();
        model
    }

    fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn recipe(&self) -> Option<Recipe> {
        self.state().recipe().cloned()
    }

    pub fn search(&self) -> SearchState {
        self.state().search().clone()
    }

    pub fn bookmarks(&self) -> Vec<Recipe> {
        self.state().bookmarks().to_vec()
    }

    pub async fn load_recipe(&self, id: &str) -> Result<LoadOutcome<Recipe>> {
        let ticket = self.recipe_requests.begin();
        tracing::debug!("Loading recipe {}", id);
        let fetched = self.api.fetch_recipe(id).await;

        if !self.recipe_requests.is_current(ticket) {
            tracing::debug!("Discarding stale response for recipe {}", id);
            return Ok(LoadOutcome::Discarded);
        }

        let mut state = self.state();
        state.set_recipe(fetched?);
        match state.recipe() {
            Some(recipe) => Ok(LoadOutcome::Applied(recipe.clone())),
            None => Err(RecipeError::NotFoundError {
                what: format!("recipe {}", id),
            }),
        }
    }

    /// Runs a search and returns the first page of results.
    pub async fn load_search_results(&self, query: &str) -> Result<LoadOutcome<Vec<RecipePreview>>> {
        let ticket = self.search_requests.begin();
        tracing::debug!("Searching recipes for '{}'", query);
        let fetched = self.api.search_recipes(query).await;

        if !self.search_requests.is_current(ticket) {
            tracing::debug!("Discarding stale search response for '{}'", query);
            return Ok(LoadOutcome::Discarded);
        }

        let results = fetched?;
        tracing::debug!("Search for '{}' returned {} results", query, results.len());
        let mut state = self.state();
        state.set_search_results(query.to_string(), results);
        Ok(LoadOutcome::Applied(state.results_page(Some(1))))
    }

    /// Results for `page`, or the current page when `None`. Never hits the API.
    pub fn search_results_page(&self, page: Option<usize>) -> Vec<RecipePreview> {
        self.state().results_page(page)
    }

    /// Rescales the current recipe. `Ok(None)` when no recipe is loaded.
    pub fn update_servings(&self, servings: u32) -> Result<Option<Recipe>> {
        validation::validate_servings(servings)?;
        let mut state = self.state();
        if !state.update_servings(servings) {
            return Ok(None);
        }
        Ok(state.recipe().cloned())
    }

    pub fn add_bookmark(&self, recipe: &Recipe) {
        let added = self.state().add_bookmark(recipe);
        if added {
            tracing::info!("Bookmarked recipe {}", recipe.id);
            self.persist_bookmarks();
        }
    }

    pub fn delete_bookmark(&self, id: &str) {
        let removed = self.state().remove_bookmark(id);
        if removed {
            tracing::info!("Removed bookmark {}", id);
            self.persist_bookmarks();
        }
    }

    /// Uploads a user recipe, makes it current and bookmarks it.
    pub async fn upload_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe> {
        let draft = new_recipe.into_draft()?;
        let created = self.api.create_recipe(&draft).await?;
        tracing::info!("Uploaded recipe {} ({})", created.id, created.title);

        // invalidate any recipe load still in flight
        self.recipe_requests.begin();
        self.state().set_recipe(created.clone());
        self.add_bookmark(&created);

        self.recipe().ok_or_else(|| RecipeError::NotFoundError {
            what: format!("recipe {}", created.id),
        })
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        self.api.delete_recipe(id).await?;
        tracing::info!("Deleted recipe {}", id);

        let mut state = self.state();
        if state.recipe().is_some_and(|r| r.id == id) {
            state.clear_recipe();
        }
        Ok(())
    }

    fn persist_bookmarks(&self) {
        let file = BookmarkFile {
            saved_at: Utc::now(),
            bookmarks: self.bookmarks(),
        };
        let written = serde_json::to_vec_pretty(&file)
            .map_err(RecipeError::from)
            .and_then(|data| self.storage.write(BOOKMARKS_KEY, &data));
        if let Err(e) = written {
            tracing::warn!("Failed to persist bookmarks: {}", e);
        }
    }

    fn restore_bookmarks(&self) {
        let data = match self.storage.read(BOOKMARKS_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Failed to read stored bookmarks: {}", e);
                return;
            }
        };

        match serde_json::from_slice::<BookmarkFile>(&data) {
            Ok(file) => {
                tracing::debug!(
                    "Restored {} bookmarks saved at {}",
                    file.bookmarks.len(),
                    file.saved_at
                );
                self.state().restore_bookmarks(file.bookmarks);
            }
            Err(e) => tracing::warn!("Ignoring corrupt bookmark data: {}", e),
        }
    }
}
