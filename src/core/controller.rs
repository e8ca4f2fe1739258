use crate::core::model::{LoadOutcome, RecipeModel};
use crate::domain::model::NewRecipe;
use crate::domain::ports::{
    AddRecipeView, BookmarksView, Navigation, PaginationView, RecipeApi, RecipeView, ResultsView,
    SearchView, Storage,
};
use std::sync::Arc;
use std::time::Duration;

pub const RECIPE_DELETED_MESSAGE: &str = "Recipe has been deleted!";

/// One view per UI region.
#[derive(Clone)]
pub struct Views {
    pub recipe: Arc<dyn RecipeView>,
    pub search: Arc<dyn SearchView>,
    pub results: Arc<dyn ResultsView>,
    pub pagination: Arc<dyn PaginationView>,
    pub bookmarks: Arc<dyn BookmarksView>,
    pub add_recipe: Arc<dyn AddRecipeView>,
}

/// Handlers for every user intent. Each one reads its input, calls the
/// model and renders the affected views. Failures end at the handler and
/// are shown on a view.
pub struct Controller<A: RecipeApi, S: Storage> {
    model: RecipeModel<A, S>,
    views: Views,
    navigation: Arc<dyn Navigation>,
    modal_close_delay: Duration,
}

impl<A: RecipeApi, S: Storage> Controller<A, S> {
    pub fn new(
        model: RecipeModel<A, S>,
        views: Views,
        navigation: Arc<dyn Navigation>,
        modal_close_delay: Duration,
    ) -> Self {
        Self {
            model,
            views,
            navigation,
            modal_close_delay,
        }
    }

    pub fn model(&self) -> &RecipeModel<A, S> {
        &self.model
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Shows the recipe selected by the navigation id.
    pub async fn show_recipe(&self) {
        let Some(id) = self.navigation.current_id() else {
            return;
        };
        self.views.recipe.render_spinner();

        // mark the selected entry in results and bookmarks
        self.views
            .results
            .update(&self.model.search_results_page(None));
        self.views.bookmarks.update(&self.model.bookmarks());

        match self.model.load_recipe(&id).await {
            Ok(LoadOutcome::Applied(recipe)) => self.views.recipe.render(&recipe),
            Ok(LoadOutcome::Discarded) => {}
            Err(e) => {
                tracing::warn!("Loading recipe {} failed: {}", id, e);
                self.views.recipe.render_error(None);
            }
        }
    }

    pub async fn search_recipes(&self) {
        let query = self.views.search.query();
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.views.results.render_spinner();

        match self.model.load_search_results(query).await {
            Ok(LoadOutcome::Applied(page)) => {
                tracing::info!("Search '{}' loaded", query);
                self.views.results.render(&page);
                self.views.pagination.render(&self.model.search());
            }
            Ok(LoadOutcome::Discarded) => {}
            Err(e) => {
                tracing::warn!("Search '{}' failed: {}", query, e);
                self.views.recipe.render_error(Some(&e.to_string()));
            }
        }
    }

    /// Re-renders the already loaded results at `page`.
    pub fn go_to_page(&self, page: usize) {
        let results = self.model.search_results_page(Some(page));
        self.views.results.render(&results);
        self.views.pagination.render(&self.model.search());
    }

    pub fn update_servings(&self, servings: u32) {
        match self.model.update_servings(servings) {
            Ok(Some(recipe)) => self.views.recipe.update(&recipe),
            Ok(None) => tracing::debug!("No recipe loaded, ignoring servings change"),
            Err(e) => tracing::warn!("Servings change to {} rejected: {}", servings, e),
        }
    }

    pub fn toggle_bookmark(&self) {
        let Some(recipe) = self.model.recipe() else {
            tracing::debug!("No recipe loaded, ignoring bookmark toggle");
            return;
        };

        if recipe.bookmarked {
            self.model.delete_bookmark(&recipe.id);
        } else {
            self.model.add_bookmark(&recipe);
        }

        if let Some(recipe) = self.model.recipe() {
            self.views.recipe.update(&recipe);
        }
        self.views.bookmarks.render(&self.model.bookmarks());
    }

    pub fn show_bookmarks(&self) {
        self.views.bookmarks.render(&self.model.bookmarks());
    }

    /// Uploads a new recipe. The form closes on its own after the
    /// configured delay; this does not wait for it.
    pub async fn add_recipe(&self, new_recipe: NewRecipe) {
        self.views.add_recipe.render_spinner();

        let recipe = match self.model.upload_recipe(new_recipe).await {
            Ok(recipe) => recipe,
            Err(e) => {
                tracing::error!("Recipe upload failed: {}", e);
                self.views.add_recipe.render_error(Some(&e.to_string()));
                return;
            }
        };

        self.views.recipe.render(&recipe);
        self.views.add_recipe.render_message(None);
        self.views.bookmarks.render(&self.model.bookmarks());
        self.navigation.push_id(&recipe.id);

        let form = Arc::clone(&self.views.add_recipe);
        let delay = self.modal_close_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            form.toggle_window();
        });
    }

    pub async fn delete_recipe(&self, id: String) {
        self.views.add_recipe.render_spinner();

        let deleted = self.model.delete_recipe(&id).await;

        // the bookmark goes even if the API call failed
        self.model.delete_bookmark(&id);
        self.views.bookmarks.render(&self.model.bookmarks());

        if let Err(e) = deleted {
            tracing::error!("Deleting recipe {} failed: {}", id, e);
            self.views.add_recipe.render_error(Some(&e.to_string()));
            return;
        }

        let query = self.model.search().query;
        if !query.is_empty() {
            match self.model.load_search_results(&query).await {
                Ok(LoadOutcome::Applied(page)) => {
                    self.views.results.render(&page);
                    self.views.pagination.render(&self.model.search());
                }
                Ok(LoadOutcome::Discarded) => {}
                Err(e) => {
                    tracing::error!("Refreshing search '{}' after delete failed: {}", query, e);
                    self.views.add_recipe.render_error(Some(&e.to_string()));
                    return;
                }
            }
        }

        self.navigation.clear();
        self.views
            .recipe
            .render_message(Some(RECIPE_DELETED_MESSAGE));
    }
}
