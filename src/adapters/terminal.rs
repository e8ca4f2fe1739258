use crate::domain::events::EventKind;
use crate::domain::model::{Ingredient, Recipe, RecipePreview, SearchState};
use crate::domain::ports::{
    AddRecipeView, BookmarksView, EventSource, Navigation, PaginationView, RecipeView,
    ResultsView, SearchView, StatusDisplay, View,
};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

const RECIPE_ERROR: &str = "We could not find that recipe. Please try another one!";
const RECIPE_MESSAGE: &str = "Start by searching for a recipe or an ingredient. Have fun!";
const RESULTS_ERROR: &str = "No recipes found for your query! Please try again ;)";
const BOOKMARKS_ERROR: &str = "No bookmarks yet. Find a nice recipe and bookmark it :)";
const UPLOAD_MESSAGE: &str = "Recipe was successfully uploaded :)";
const UPLOAD_ERROR: &str = "Recipe upload failed";

/// Shared line-oriented output for all terminal views.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }

    fn status(&self, region: &str, text: &str) {
        self.line(&format!("[{}] {}", region, text));
    }
}

/// Formats a quantity without trailing zeros, rounded to two decimals.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_ingredient(ingredient: &Ingredient) -> String {
    let mut parts = Vec::new();
    if let Some(quantity) = ingredient.quantity {
        parts.push(format_quantity(quantity));
    }
    if !ingredient.unit.is_empty() {
        parts.push(ingredient.unit.clone());
    }
    parts.push(ingredient.description.clone());
    parts.join(" ")
}

/// Holds the current recipe id, the terminal's stand-in for the URL fragment.
#[derive(Debug, Default)]
pub struct MemoryNavigation {
    current: Mutex<Option<String>>,
}

impl MemoryNavigation {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            current: Mutex::new(initial.filter(|id| !id.is_empty())),
        }
    }

    /// Parses a `#id` fragment; `#` alone selects nothing.
    pub fn set_fragment(&self, fragment: &str) {
        let id = fragment.trim().trim_start_matches('#');
        if id.is_empty() {
            self.clear();
        } else {
            self.push_id(id);
        }
    }
}

impl Navigation for MemoryNavigation {
    fn current_id(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push_id(&self, id: &str) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.to_string());
    }

    fn clear(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

pub struct TerminalRecipeView {
    console: Console,
}

impl TerminalRecipeView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl StatusDisplay for TerminalRecipeView {
    fn render_spinner(&self) {
        self.console.status("recipe", "Loading...");
    }

    fn render_error(&self, message: Option<&str>) {
        self.console.status("recipe", message.unwrap_or(RECIPE_ERROR));
    }

    fn render_message(&self, message: Option<&str>) {
        self.console.status("recipe", message.unwrap_or(RECIPE_MESSAGE));
    }
}

impl View<Recipe> for TerminalRecipeView {
    fn render(&self, recipe: &Recipe) {
        let marker = if recipe.bookmarked { " *" } else { "" };
        self.console.line(&format!("== {}{} ==", recipe.title, marker));
        self.console.line(&format!(
            "{} minutes | {} servings | by {}",
            recipe.cooking_time, recipe.servings, recipe.publisher
        ));
        if recipe.key.is_some() {
            self.console.line("(your recipe)");
        }
        for ingredient in &recipe.ingredients {
            self.console.line(&format!("  - {}", format_ingredient(ingredient)));
        }
        self.console.line(&format!("Directions: {}", recipe.source_url));
    }
}

impl EventSource for TerminalRecipeView {
    fn events(&self) -> &[EventKind] {
        &[
            EventKind::RecipeRequested,
            EventKind::ServingsChanged,
            EventKind::BookmarkToggled,
            EventKind::RecipeDeleteRequested,
        ]
    }
}

impl RecipeView for TerminalRecipeView {}

/// Holds the text typed after `search`.
#[derive(Default)]
pub struct TerminalSearchView {
    input: Mutex<String>,
}

impl TerminalSearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, query: &str) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = query.to_string();
    }
}

impl SearchView for TerminalSearchView {
    /// Reading the query empties the input, like submitting a search box.
    fn query(&self) -> String {
        let query = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.clear_input();
        query
    }

    fn clear_input(&self) {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSource for TerminalSearchView {
    fn events(&self) -> &[EventKind] {
        &[EventKind::SearchSubmitted]
    }
}

pub struct TerminalResultsView {
    console: Console,
    navigation: Arc<MemoryNavigation>,
}

impl TerminalResultsView {
    pub fn new(console: Console, navigation: Arc<MemoryNavigation>) -> Self {
        Self {
            console,
            navigation,
        }
    }

    fn list(&self, results: &[RecipePreview]) {
        let selected = self.navigation.current_id();
        for preview in results {
            let marker = if selected.as_deref() == Some(preview.id.as_str()) {
                ">"
            } else {
                " "
            };
            let own = if preview.key.is_some() { " (yours)" } else { "" };
            self.console.line(&format!(
                "{} {} | {} - {}{}",
                marker, preview.id, preview.title, preview.publisher, own
            ));
        }
    }
}

impl StatusDisplay for TerminalResultsView {
    fn render_spinner(&self) {
        self.console.status("results", "Loading...");
    }

    fn render_error(&self, message: Option<&str>) {
        self.console.status("results", message.unwrap_or(RESULTS_ERROR));
    }

    fn render_message(&self, message: Option<&str>) {
        self.console.status("results", message.unwrap_or(""));
    }
}

impl View<[RecipePreview]> for TerminalResultsView {
    fn render(&self, results: &[RecipePreview]) {
        if results.is_empty() {
            self.render_error(None);
            return;
        }
        self.list(results);
    }

    // only the selection marker changes; empty lists stay quiet
    fn update(&self, results: &[RecipePreview]) {
        if !results.is_empty() {
            self.list(results);
        }
    }
}

impl EventSource for TerminalResultsView {}

impl ResultsView for TerminalResultsView {}

pub struct TerminalPaginationView {
    console: Console,
}

impl TerminalPaginationView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

/// Text of the pagination controls for `search`.
pub fn pagination_label(search: &SearchState) -> String {
    let pages = search.num_pages();
    if pages <= 1 {
        return String::new();
    }
    let mut parts = Vec::new();
    if search.has_previous_page() {
        parts.push(format!("< Page {}", search.page - 1));
    }
    parts.push(format!("Page {} of {}", search.page, pages));
    if search.has_next_page() {
        parts.push(format!("Page {} >", search.page + 1));
    }
    parts.join("  ")
}

impl StatusDisplay for TerminalPaginationView {
    fn render_spinner(&self) {}

    fn render_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            self.console.status("pages", message);
        }
    }

    fn render_message(&self, message: Option<&str>) {
        if let Some(message) = message {
            self.console.status("pages", message);
        }
    }
}

impl View<SearchState> for TerminalPaginationView {
    fn render(&self, search: &SearchState) {
        let label = pagination_label(search);
        if !label.is_empty() {
            self.console.status("pages", &label);
        }
    }
}

impl EventSource for TerminalPaginationView {
    fn events(&self) -> &[EventKind] {
        &[EventKind::PageRequested]
    }
}

impl PaginationView for TerminalPaginationView {}

pub struct TerminalBookmarksView {
    console: Console,
}

impl TerminalBookmarksView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl StatusDisplay for TerminalBookmarksView {
    fn render_spinner(&self) {
        self.console.status("bookmarks", "Loading...");
    }

    fn render_error(&self, message: Option<&str>) {
        self.console.status("bookmarks", message.unwrap_or(BOOKMARKS_ERROR));
    }

    fn render_message(&self, message: Option<&str>) {
        self.console.status("bookmarks", message.unwrap_or(""));
    }
}

impl View<[Recipe]> for TerminalBookmarksView {
    fn render(&self, bookmarks: &[Recipe]) {
        if bookmarks.is_empty() {
            self.render_error(None);
            return;
        }
        self.console
            .status("bookmarks", &format!("{} saved", bookmarks.len()));
        for bookmark in bookmarks {
            self.console
                .line(&format!("  * {} | {}", bookmark.id, bookmark.title));
        }
    }

    fn update(&self, _bookmarks: &[Recipe]) {}
}

impl EventSource for TerminalBookmarksView {
    fn events(&self) -> &[EventKind] {
        &[EventKind::BookmarksLoaded]
    }
}

impl BookmarksView for TerminalBookmarksView {}

pub struct TerminalAddRecipeView {
    console: Console,
    open: Mutex<bool>,
}

impl TerminalAddRecipeView {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            open: Mutex::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the form for a submission. The close timer toggles it shut.
    pub fn open(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }
}

impl StatusDisplay for TerminalAddRecipeView {
    fn render_spinner(&self) {
        self.console.status("form", "Working...");
    }

    fn render_error(&self, message: Option<&str>) {
        self.console.status("form", message.unwrap_or(UPLOAD_ERROR));
    }

    fn render_message(&self, message: Option<&str>) {
        self.console.status("form", message.unwrap_or(UPLOAD_MESSAGE));
    }
}

impl AddRecipeView for TerminalAddRecipeView {
    fn toggle_window(&self) {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        *open = !*open;
        tracing::debug!("Add-recipe form {}", if *open { "opened" } else { "closed" });
    }
}

impl EventSource for TerminalAddRecipeView {
    fn events(&self) -> &[EventKind] {
        &[EventKind::RecipeSubmitted]
    }
}
