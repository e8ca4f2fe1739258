use crate::domain::events::EventKind;
use crate::domain::model::{Recipe, RecipeDraft, RecipePreview, SearchState};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn fetch_recipe(&self, id: &str) -> Result<Recipe>;
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipePreview>>;
    async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe>;
    async fn delete_recipe(&self, id: &str) -> Result<()>;
}

/// Key-value store for small documents such as the bookmark list.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
    fn results_per_page(&self) -> usize;
    fn modal_close_delay(&self) -> Duration;
    fn data_dir(&self) -> &str;
}

/// The URL fragment that selects the displayed recipe.
pub trait Navigation: Send + Sync {
    fn current_id(&self) -> Option<String>;
    fn push_id(&self, id: &str);
    fn clear(&self);
}

/// Events a view emits. The composition root binds each one to a handler.
pub trait EventSource {
    fn events(&self) -> &[EventKind] {
        &[]
    }
}

pub trait StatusDisplay: Send + Sync {
    fn render_spinner(&self);
    /// `None` shows the view's default error text.
    fn render_error(&self, message: Option<&str>);
    /// `None` shows the view's default message text.
    fn render_message(&self, message: Option<&str>);
}

pub trait View<T: ?Sized>: StatusDisplay {
    fn render(&self, data: &T);

    /// Partial re-render; views without a cheaper path fall back to `render`.
    fn update(&self, data: &T) {
        self.render(data);
    }
}

pub trait RecipeView: View<Recipe> + EventSource {}

pub trait ResultsView: View<[RecipePreview]> + EventSource {}

pub trait PaginationView: View<SearchState> + EventSource {}

pub trait BookmarksView: View<[Recipe]> + EventSource {}

pub trait SearchView: EventSource + Send + Sync {
    fn query(&self) -> String;
    fn clear_input(&self);
}

pub trait AddRecipeView: StatusDisplay + EventSource {
    fn toggle_window(&self);
}
