use crate::core::controller::{Controller, Views};
use crate::domain::events::{EventKind, UiEvent};
use crate::domain::ports::{RecipeApi, Storage};
use crate::utils::error::{RecipeError, Result};
use std::collections::BTreeMap;

/// Event kinds the controller has a handler for.
pub const HANDLED_EVENTS: [EventKind; 8] = [
    EventKind::RecipeRequested,
    EventKind::ServingsChanged,
    EventKind::BookmarkToggled,
    EventKind::SearchSubmitted,
    EventKind::PageRequested,
    EventKind::BookmarksLoaded,
    EventKind::RecipeSubmitted,
    EventKind::RecipeDeleteRequested,
];

/// Which view emits each event. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct EventBindings {
    sources: BTreeMap<EventKind, &'static str>,
}

impl EventBindings {
    /// Every handled event must be declared by exactly one view.
    pub fn bind(views: &Views) -> Result<Self> {
        let declared: [(&'static str, &[EventKind]); 6] = [
            ("recipe", views.recipe.events()),
            ("search", views.search.events()),
            ("results", views.results.events()),
            ("pagination", views.pagination.events()),
            ("bookmarks", views.bookmarks.events()),
            ("add_recipe", views.add_recipe.events()),
        ];

        let mut bindings = Self::default();
        for (view_name, events) in declared {
            for &kind in events {
                bindings.register(kind, view_name)?;
            }
        }

        for kind in HANDLED_EVENTS {
            if !bindings.sources.contains_key(&kind) {
                return Err(RecipeError::ConfigError {
                    message: format!("no view emits {:?}", kind),
                });
            }
        }

        Ok(bindings)
    }

    fn register(&mut self, kind: EventKind, view_name: &'static str) -> Result<()> {
        if let Some(existing) = self.sources.insert(kind, view_name) {
            return Err(RecipeError::ConfigError {
                message: format!(
                    "{:?} is emitted by both the {} and {} views",
                    kind, existing, view_name
                ),
            });
        }
        tracing::debug!("Bound {:?} from the {} view", kind, view_name);
        Ok(())
    }

    pub fn source(&self, kind: EventKind) -> Option<&'static str> {
        self.sources.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Composition root: a controller plus the event wiring of its views.
pub struct App<A: RecipeApi, S: Storage> {
    controller: Controller<A, S>,
    bindings: EventBindings,
}

impl<A: RecipeApi, S: Storage> App<A, S> {
    pub fn init(controller: Controller<A, S>) -> Result<Self> {
        let bindings = EventBindings::bind(controller.views())?;
        tracing::info!("Bound {} view events", bindings.len());
        Ok(Self {
            controller,
            bindings,
        })
    }

    pub fn controller(&self) -> &Controller<A, S> {
        &self.controller
    }

    pub fn bindings(&self) -> &EventBindings {
        &self.bindings
    }

    /// Initial page load: bookmarks first, then whatever the navigation id selects.
    pub async fn start(&self) -> Result<()> {
        self.dispatch(UiEvent::BookmarksLoaded).await?;
        self.dispatch(UiEvent::RecipeRequested).await
    }

    /// Runs the handler bound to `event`. Handler failures are rendered by
    /// the handler itself; only an unbound event is an error here.
    pub async fn dispatch(&self, event: UiEvent) -> Result<()> {
        let kind = event.kind();
        let source = self
            .bindings
            .source(kind)
            .ok_or_else(|| RecipeError::ConfigError {
                message: format!("{:?} is not bound to any view", kind),
            })?;
        tracing::debug!("Dispatching {:?} from the {} view", kind, source);

        match event {
            UiEvent::RecipeRequested => self.controller.show_recipe().await,
            UiEvent::ServingsChanged(servings) => self.controller.update_servings(servings),
            UiEvent::BookmarkToggled => self.controller.toggle_bookmark(),
            UiEvent::SearchSubmitted => self.controller.search_recipes().await,
            UiEvent::PageRequested(page) => self.controller.go_to_page(page),
            UiEvent::BookmarksLoaded => self.controller.show_bookmarks(),
            UiEvent::RecipeSubmitted(new_recipe) => self.controller.add_recipe(new_recipe).await,
            UiEvent::RecipeDeleteRequested(id) => self.controller.delete_recipe(id).await,
        }
        Ok(())
    }
}
