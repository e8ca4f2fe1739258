use clap::Parser;
use recipe_controller::adapters::commands::{load_new_recipe, Command, HELP};
use recipe_controller::adapters::terminal::{
    Console, MemoryNavigation, TerminalAddRecipeView, TerminalBookmarksView,
    TerminalPaginationView, TerminalRecipeView, TerminalResultsView, TerminalSearchView,
};
use recipe_controller::core::{ConfigProvider, UiEvent};
use recipe_controller::utils::{logger, validation::Validate};
use recipe_controller::{
    App, AppConfig, CliConfig, Controller, ForkifyClient, LocalStorage, RecipeModel, Views,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting recipe-controller");

    let config = match AppConfig::resolve(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Config: {:?}", config);
    if config.api_key.is_none() {
        tracing::warn!("No API key configured; uploads and deletes will be rejected");
    }

    let api = ForkifyClient::from_config(&config)?;
    let storage = LocalStorage::new(config.data_dir().to_string());
    let model = RecipeModel::new(api, storage, config.results_per_page());

    let console = Console::stdout();
    let navigation = Arc::new(MemoryNavigation::new(cli.recipe.clone()));
    let search_view = Arc::new(TerminalSearchView::new());
    let form_view = Arc::new(TerminalAddRecipeView::new(console.clone()));
    let views = Views {
        recipe: Arc::new(TerminalRecipeView::new(console.clone())),
        search: search_view.clone(),
        results: Arc::new(TerminalResultsView::new(console.clone(), navigation.clone())),
        pagination: Arc::new(TerminalPaginationView::new(console.clone())),
        bookmarks: Arc::new(TerminalBookmarksView::new(console.clone())),
        add_recipe: form_view.clone(),
    };

    let controller = Controller::new(model, views, navigation.clone(), config.modal_close_delay());
    let app = App::init(controller)?;
    app.start().await?;

    console.line("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                console.line(&e.to_string());
                continue;
            }
        };

        let event = match command {
            Command::Open(id) => {
                navigation.set_fragment(&id);
                UiEvent::RecipeRequested
            }
            Command::Search(query) => {
                search_view.set_input(&query);
                UiEvent::SearchSubmitted
            }
            Command::Page(page) => UiEvent::PageRequested(page),
            Command::Servings(servings) => UiEvent::ServingsChanged(servings),
            Command::ToggleBookmark => UiEvent::BookmarkToggled,
            Command::Bookmarks => UiEvent::BookmarksLoaded,
            Command::Upload(path) => match load_new_recipe(&path) {
                Ok(new_recipe) => {
                    form_view.open();
                    UiEvent::RecipeSubmitted(new_recipe)
                }
                Err(e) => {
                    console.line(&e.user_friendly_message());
                    continue;
                }
            },
            Command::Delete(id) => UiEvent::RecipeDeleteRequested(id),
            Command::Help => {
                console.line(HELP);
                continue;
            }
            Command::Quit => break,
        };

        app.dispatch(event).await?;
    }

    tracing::info!("Bye");
    Ok(())
}
