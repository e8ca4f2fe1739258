use crate::domain::model::NewRecipe;

/// The kinds of user interaction a view can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Page load or navigation id change.
    RecipeRequested,
    ServingsChanged,
    BookmarkToggled,
    SearchSubmitted,
    PageRequested,
    BookmarksLoaded,
    RecipeSubmitted,
    RecipeDeleteRequested,
}

/// A user interaction together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    RecipeRequested,
    ServingsChanged(u32),
    BookmarkToggled,
    SearchSubmitted,
    PageRequested(usize),
    BookmarksLoaded,
    RecipeSubmitted(NewRecipe),
    RecipeDeleteRequested(String),
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::RecipeRequested => EventKind::RecipeRequested,
            UiEvent::ServingsChanged(_) => EventKind::ServingsChanged,
            UiEvent::BookmarkToggled => EventKind::BookmarkToggled,
            UiEvent::SearchSubmitted => EventKind::SearchSubmitted,
            UiEvent::PageRequested(_) => EventKind::PageRequested,
            UiEvent::BookmarksLoaded => EventKind::BookmarksLoaded,
            UiEvent::RecipeSubmitted(_) => EventKind::RecipeSubmitted,
            UiEvent::RecipeDeleteRequested(_) => EventKind::RecipeDeleteRequested,
        }
    }
}
