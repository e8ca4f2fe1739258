mod common;

use common::{Call, FakeViews, MODAL_CLOSE};
use httpmock::prelude::*;
use recipe_controller::adapters::terminal::MemoryNavigation;
use recipe_controller::core::{ConfigProvider, Navigation, NewRecipe, UiEvent};
use recipe_controller::{App, AppConfig, Controller, ForkifyClient, LocalStorage, RecipeModel};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn recipe_body(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "data": {"recipe": {
            "id": id,
            "title": title,
            "publisher": "Closet Cooking",
            "source_url": "https://example.com/source",
            "image_url": "https://example.com/image.jpg",
            "servings": 4,
            "cooking_time": 30,
            "ingredients": [
                {"quantity": 2, "unit": "", "description": "eggs"}
            ]
        }}
    })
}

fn search_body(count: usize) -> serde_json::Value {
    let recipes: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": format!("pizza-{}", i),
                "title": format!("Pizza {}", i),
                "publisher": "Closet Cooking",
                "image_url": "https://example.com/image.jpg"
            })
        })
        .collect();
    serde_json::json!({
        "status": "success",
        "results": count,
        "data": {"recipes": recipes}
    })
}

struct TestApp {
    app: App<ForkifyClient, LocalStorage>,
    views: FakeViews,
    navigation: Arc<MemoryNavigation>,
    _data_dir: TempDir,
}

fn build_app(server: &MockServer, key: Option<&str>) -> TestApp {
    let data_dir = TempDir::new().unwrap();
    let config = AppConfig {
        api_url: server.url("/api/v2/recipes/"),
        api_key: key.map(str::to_string),
        timeout_seconds: 5,
        data_dir: data_dir.path().to_str().unwrap().to_string(),
        ..AppConfig::default()
    };

    let api = ForkifyClient::from_config(&config).unwrap();
    let storage = LocalStorage::new(config.data_dir().to_string());
    let model = RecipeModel::new(api, storage, config.results_per_page());
    let views = FakeViews::new();
    let navigation = Arc::new(MemoryNavigation::new(None));
    let controller = Controller::new(model, views.views(), navigation.clone(), MODAL_CLOSE);

    TestApp {
        app: App::init(controller).unwrap(),
        views,
        navigation,
        _data_dir: data_dir,
    }
}

#[tokio::test]
async fn test_search_then_open_recipe_over_http() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/recipes/")
            .query_param("search", "pizza");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(search_body(30));
    });
    let recipe_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v2/recipes/pizza-12");
        then.status(200).json_body(recipe_body("pizza-12", "Pizza 12"));
    });

    let test = build_app(&server, None);
    test.views.search.set_query("pizza");
    test.app.dispatch(UiEvent::SearchSubmitted).await.unwrap();
    test.app.dispatch(UiEvent::PageRequested(2)).await.unwrap();

    search_mock.assert_hits(1);
    assert_eq!(
        test.views.pagination.last(),
        Some(Call::RenderPagination { page: 2, pages: 3 })
    );

    test.navigation.push_id("pizza-12");
    test.app.dispatch(UiEvent::RecipeRequested).await.unwrap();

    recipe_mock.assert();
    assert!(matches!(
        test.views.recipe.last(),
        Some(Call::RenderRecipe(r)) if r.title == "Pizza 12" && r.ingredients[0].quantity == Some(2.0)
    ));
    // the open page of results is refreshed before loading
    assert!(test.views.results.calls().contains(&Call::UpdateResults(
        (11..=20).map(|i| format!("pizza-{}", i)).collect()
    )));
}

#[tokio::test]
async fn test_server_error_renders_generic_recipe_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/recipes/bad-id");
        then.status(400).json_body(serde_json::json!({
            "status": "fail",
            "message": "Invalid _id: bad-id"
        }));
    });

    let test = build_app(&server, None);
    test.navigation.push_id("bad-id");
    test.app.dispatch(UiEvent::RecipeRequested).await.unwrap();

    assert_eq!(
        test.views.recipe.calls(),
        vec![Call::Spinner, Call::Error(None)]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_then_delete_over_http() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/recipes/")
            .query_param("key", "test-key")
            .body_contains("\"description\":\"Flour\"");
        then.status(201)
            .json_body(recipe_body("new-recipe", "Weeknight pizza"));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v2/recipes/new-recipe")
            .query_param("key", "test-key");
        then.status(204);
    });

    let test = build_app(&server, Some("test-key"));
    let new_recipe = NewRecipe {
        title: "Weeknight pizza".to_string(),
        source_url: "https://example.com/source".to_string(),
        image_url: "https://example.com/image.jpg".to_string(),
        publisher: "Me".to_string(),
        cooking_time: 30,
        servings: 4,
        ingredients: vec!["0.5,kg,Flour".to_string()],
    };

    test.app
        .dispatch(UiEvent::RecipeSubmitted(new_recipe))
        .await
        .unwrap();

    upload_mock.assert();
    assert_eq!(test.navigation.current_id().as_deref(), Some("new-recipe"));
    assert_eq!(
        test.views.bookmarks.last(),
        Some(Call::RenderBookmarks(vec!["new-recipe".to_string()]))
    );

    test.app
        .dispatch(UiEvent::RecipeDeleteRequested("new-recipe".to_string()))
        .await
        .unwrap();

    delete_mock.assert();
    assert!(test.navigation.current_id().is_none());
    assert_eq!(
        test.views.bookmarks.last(),
        Some(Call::RenderBookmarks(vec![]))
    );

    tokio::time::sleep(MODAL_CLOSE + Duration::from_millis(300)).await;
    assert!(test.views.add_recipe.calls().contains(&Call::ToggleWindow));
}
