#![allow(dead_code)]

use async_trait::async_trait;
use recipe_controller::adapters::terminal::MemoryNavigation;
use recipe_controller::core::{
    AddRecipeView, BookmarksView, EventKind, EventSource, Ingredient, PaginationView, Recipe,
    RecipeApi, RecipeDraft, RecipePreview, RecipeView, ResultsView, SearchState, SearchView,
    StatusDisplay, View,
};
use recipe_controller::{Controller, MemoryStorage, RecipeError, RecipeModel, Result, Views};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MODAL_CLOSE: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Spinner,
    Error(Option<String>),
    Message(Option<String>),
    RenderRecipe(Recipe),
    UpdateRecipe(Recipe),
    RenderResults(Vec<String>),
    UpdateResults(Vec<String>),
    RenderPagination { page: usize, pages: usize },
    RenderBookmarks(Vec<String>),
    UpdateBookmarks(Vec<String>),
    ToggleWindow,
}

/// Records every call made to it. Implements all view traits so one type
/// can stand in for any UI region.
#[derive(Default)]
pub struct FakeView {
    events: Vec<EventKind>,
    query: Mutex<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeView {
    pub fn emitting(events: &[EventKind]) -> Arc<Self> {
        Arc::new(Self {
            events: events.to_vec(),
            ..Self::default()
        })
    }

    pub fn set_query(&self, query: &str) {
        *self.query.lock().unwrap() = query.to_string();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn last(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| id(i).to_string()).collect()
}

impl StatusDisplay for FakeView {
    fn render_spinner(&self) {
        self.record(Call::Spinner);
    }

    fn render_error(&self, message: Option<&str>) {
        self.record(Call::Error(message.map(str::to_string)));
    }

    fn render_message(&self, message: Option<&str>) {
        self.record(Call::Message(message.map(str::to_string)));
    }
}

impl EventSource for FakeView {
    fn events(&self) -> &[EventKind] {
        &self.events
    }
}

impl View<Recipe> for FakeView {
    fn render(&self, data: &Recipe) {
        self.record(Call::RenderRecipe(data.clone()));
    }

    fn update(&self, data: &Recipe) {
        self.record(Call::UpdateRecipe(data.clone()));
    }
}

impl View<[RecipePreview]> for FakeView {
    fn render(&self, data: &[RecipePreview]) {
        self.record(Call::RenderResults(ids(data, |p| p.id.as_str())));
    }

    fn update(&self, data: &[RecipePreview]) {
        self.record(Call::UpdateResults(ids(data, |p| p.id.as_str())));
    }
}

impl View<SearchState> for FakeView {
    fn render(&self, data: &SearchState) {
        self.record(Call::RenderPagination {
            page: data.page,
            pages: data.num_pages(),
        });
    }
}

impl View<[Recipe]> for FakeView {
    fn render(&self, data: &[Recipe]) {
        self.record(Call::RenderBookmarks(ids(data, |r| r.id.as_str())));
    }

    fn update(&self, data: &[Recipe]) {
        self.record(Call::UpdateBookmarks(ids(data, |r| r.id.as_str())));
    }
}

impl SearchView for FakeView {
    fn query(&self) -> String {
        self.query.lock().unwrap().clone()
    }

    fn clear_input(&self) {
        self.query.lock().unwrap().clear();
    }
}

impl AddRecipeView for FakeView {
    fn toggle_window(&self) {
        self.record(Call::ToggleWindow);
    }
}

impl RecipeView for FakeView {}
impl ResultsView for FakeView {}
impl PaginationView for FakeView {}
impl BookmarksView for FakeView {}

pub struct FakeViews {
    pub recipe: Arc<FakeView>,
    pub search: Arc<FakeView>,
    pub results: Arc<FakeView>,
    pub pagination: Arc<FakeView>,
    pub bookmarks: Arc<FakeView>,
    pub add_recipe: Arc<FakeView>,
}

impl FakeViews {
    pub fn new() -> Self {
        Self {
            recipe: FakeView::emitting(&[
                EventKind::RecipeRequested,
                EventKind::ServingsChanged,
                EventKind::BookmarkToggled,
                EventKind::RecipeDeleteRequested,
            ]),
            search: FakeView::emitting(&[EventKind::SearchSubmitted]),
            results: FakeView::emitting(&[]),
            pagination: FakeView::emitting(&[EventKind::PageRequested]),
            bookmarks: FakeView::emitting(&[EventKind::BookmarksLoaded]),
            add_recipe: FakeView::emitting(&[EventKind::RecipeSubmitted]),
        }
    }

    pub fn views(&self) -> Views {
        Views {
            recipe: self.recipe.clone(),
            search: self.search.clone(),
            results: self.results.clone(),
            pagination: self.pagination.clone(),
            bookmarks: self.bookmarks.clone(),
            add_recipe: self.add_recipe.clone(),
        }
    }

    pub fn clear(&self) {
        for view in [
            &self.recipe,
            &self.search,
            &self.results,
            &self.pagination,
            &self.bookmarks,
            &self.add_recipe,
        ] {
            view.clear();
        }
    }
}

#[derive(Default)]
struct FakeApiState {
    recipes: HashMap<String, Recipe>,
    search_results: HashMap<String, Vec<RecipePreview>>,
    search_delays: HashMap<String, Duration>,
    fetch_delays: HashMap<String, Duration>,
    fail_search: bool,
    fail_delete: bool,
    next_id: usize,
    fetch_calls: Vec<String>,
    search_calls: Vec<String>,
    delete_calls: Vec<String>,
    create_calls: Vec<RecipeDraft>,
}

/// In-memory recipe API. Clones share state so a test can inspect calls
/// after handing one to the model.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeApiState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(self, recipe: Recipe) -> Self {
        self.state
            .lock()
            .unwrap()
            .recipes
            .insert(recipe.id.clone(), recipe);
        self
    }

    pub fn with_search(self, query: &str, results: Vec<RecipePreview>) -> Self {
        self.state
            .lock()
            .unwrap()
            .search_results
            .insert(query.to_string(), results);
        self
    }

    pub fn with_search_delay(self, query: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .search_delays
            .insert(query.to_string(), delay);
        self
    }

    pub fn with_fetch_delay(self, id: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .fetch_delays
            .insert(id.to_string(), delay);
        self
    }

    pub fn failing_searches(self) -> Self {
        self.state.lock().unwrap().fail_search = true;
        self
    }

    pub fn failing_deletes(self) -> Self {
        self.state.lock().unwrap().fail_delete = true;
        self
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().fetch_calls.clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().search_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    pub fn create_calls(&self) -> Vec<RecipeDraft> {
        self.state.lock().unwrap().create_calls.clone()
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn fetch_recipe(&self, id: &str) -> Result<Recipe> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.fetch_calls.push(id.to_string());
            state.fetch_delays.get(id).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        state
            .recipes
            .get(id)
            .cloned()
            .ok_or_else(|| RecipeError::ApiError {
                status: 400,
                message: format!("Invalid _id: {}", id),
            })
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipePreview>> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.search_calls.push(query.to_string());
            state.search_delays.get(query).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        if state.fail_search {
            return Err(RecipeError::TimeoutError { seconds: 10 });
        }
        Ok(state.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.create_calls.push(draft.clone());
        let recipe = Recipe {
            id: format!("user-{}", state.next_id),
            title: draft.title.clone(),
            publisher: draft.publisher.clone(),
            source_url: draft.source_url.clone(),
            image_url: draft.image_url.clone(),
            servings: draft.servings,
            cooking_time: draft.cooking_time,
            ingredients: draft.ingredients.clone(),
            key: Some("test-key".to_string()),
            bookmarked: false,
        };
        state.recipes.insert(recipe.id.clone(), recipe.clone());
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(id.to_string());
        if state.fail_delete {
            return Err(RecipeError::ApiError {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }
        state.recipes.remove(id);
        for results in state.search_results.values_mut() {
            results.retain(|p| p.id != id);
        }
        Ok(())
    }
}

pub fn recipe(id: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: format!("Recipe {}", id),
        publisher: "Test Kitchen".to_string(),
        source_url: format!("https://example.com/{}", id),
        image_url: format!("https://example.com/{}.jpg", id),
        servings: 4,
        cooking_time: 40,
        ingredients: vec![
            Ingredient {
                quantity: Some(2.0),
                unit: "cups".to_string(),
                description: "flour".to_string(),
            },
            Ingredient {
                quantity: None,
                unit: String::new(),
                description: "salt".to_string(),
            },
        ],
        key: None,
        bookmarked: false,
    }
}

pub fn previews(prefix: &str, count: usize) -> Vec<RecipePreview> {
    (1..=count)
        .map(|i| recipe(&format!("{}-{}", prefix, i)).preview())
        .collect()
}

pub fn preview_ids(prefix: &str, range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("{}-{}", prefix, i)).collect()
}

pub struct Harness {
    pub controller: Controller<FakeApi, MemoryStorage>,
    pub api: FakeApi,
    pub views: FakeViews,
    pub navigation: Arc<MemoryNavigation>,
    pub storage: MemoryStorage,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        Self::with_storage(api, MemoryStorage::new())
    }

    pub fn with_storage(api: FakeApi, storage: MemoryStorage) -> Self {
        let views = FakeViews::new();
        let navigation = Arc::new(MemoryNavigation::new(None));
        let model = RecipeModel::new(api.clone(), storage.clone(), 10);
        let controller = Controller::new(model, views.views(), navigation.clone(), MODAL_CLOSE);
        Self {
            controller,
            api,
            views,
            navigation,
            storage,
        }
    }
}
