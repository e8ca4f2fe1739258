use crate::domain::model::{Recipe, RecipePreview, SearchState};

/// Application state. Fields are private so the bookmark flag and the
/// search page can only change through the methods below.
#[derive(Debug, Clone)]
pub struct AppState {
    recipe: Option<Recipe>,
    search: SearchState,
    bookmarks: Vec<Recipe>,
}

impl AppState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            recipe: None,
            search: SearchState::new(results_per_page),
            bookmarks: Vec::new(),
        }
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn bookmarks(&self) -> &[Recipe] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }

    /// Makes `recipe` current, deriving its bookmark flag from the list.
    pub fn set_recipe(&mut self, mut recipe: Recipe) {
        recipe.bookmarked = self.is_bookmarked(&recipe.id);
        self.recipe = Some(recipe);
    }

    pub fn clear_recipe(&mut self) {
        self.recipe = None;
    }

    pub fn set_search_results(&mut self, query: String, results: Vec<RecipePreview>) {
        self.search.query = query;
        self.search.results = results;
        self.search.page = 1;
    }

    /// Moves to `page` (clamped) and returns that page's results.
    pub fn results_page(&mut self, page: Option<usize>) -> Vec<RecipePreview> {
        let target = page.unwrap_or(self.search.page);
        self.search.page = self.search.clamp_page(target);
        self.search.page_slice(self.search.page).to_vec()
    }

    /// Returns false when there is no current recipe.
    pub fn update_servings(&mut self, servings: u32) -> bool {
        match self.recipe.as_mut() {
            Some(recipe) => {
                recipe.scale_servings(servings);
                true
            }
            None => false,
        }
    }

    /// Returns false if a bookmark with the same id already exists.
    pub fn add_bookmark(&mut self, recipe: &Recipe) -> bool {
        if self.is_bookmarked(&recipe.id) {
            return false;
        }
        let mut stored = recipe.clone();
        stored.bookmarked = true;
        self.bookmarks.push(stored);
        if let Some(current) = self.recipe.as_mut().filter(|r| r.id == recipe.id) {
            current.bookmarked = true;
        }
        true
    }

    /// Returns false if no bookmark had that id.
    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        if let Some(current) = self.recipe.as_mut().filter(|r| r.id == id) {
            current.bookmarked = false;
        }
        self.bookmarks.len() != before
    }

    /// Replaces the bookmark list, dropping duplicate ids.
    pub fn restore_bookmarks(&mut self, bookmarks: Vec<Recipe>) {
        self.bookmarks.clear();
        for bookmark in bookmarks {
            self.add_bookmark(&bookmark);
        }
        let bookmarked = self
            .recipe
            .as_ref()
            .is_some_and(|current| self.is_bookmarked(&current.id));
        if let Some(current) = self.recipe.as_mut() {
            current.bookmarked = bookmarked;
        }
    }
}
