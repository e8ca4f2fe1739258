pub mod app;
pub mod controller;
pub mod model;
pub mod sequence;

pub use crate::domain::events::{EventKind, UiEvent};
pub use crate::domain::model::{Ingredient, NewRecipe, Recipe, RecipeDraft, RecipePreview, SearchState};
pub use crate::domain::ports::{
    AddRecipeView, BookmarksView, ConfigProvider, EventSource, Navigation, PaginationView,
    RecipeApi, RecipeView, ResultsView, SearchView, StatusDisplay, Storage, View,
};
pub use crate::utils::error::Result;
