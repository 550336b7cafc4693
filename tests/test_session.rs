use mockito::{Matcher, Server};
use recipe_finder::{
    AppConfig, AppState, Catalog, Category, HistoryNavigator, IngredientExplorer, Navigator,
    SearchDispatcher, SearchMode, SearchOutcome, SearchSession, SearchSlices,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn config_for(url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.meals.base_url = format!("{}/meal", url);
    config.drinks.base_url = format!("{}/drink", url);
    config.debounce_ms = 50;
    config.timeout = 5;
    config
}

#[tokio::test]
async fn test_typed_query_is_dispatched_once_after_quiet_period() {
    let _ = env_logger::try_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/drink/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "Margarita".into()))
        .with_status(200)
        .with_body(
            r#"{"drinks":[{"idDrink":"11007","strDrink":"Margarita","strDrinkThumb":"https://example.com/m.jpg","strAlcoholic":"Alcoholic"}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let state = AppState::default();
    let navigator = Arc::new(HistoryNavigator::new("/drinks"));
    let dispatcher = Arc::new(SearchDispatcher::new(
        Catalog::from_config(&config).unwrap(),
        SearchSlices::from(&state),
        navigator.clone(),
    ));
    let mut session = SearchSession::new(Category::Drink, dispatcher, config.debounce());

    // Keystrokes well inside the quiet period
    for text in ["M", "Ma", "Marg", "Margarita"] {
        session.set_text(text);
    }

    let outcome = timeout(Duration::from_secs(5), session.next_outcome())
        .await
        .expect("search should settle")
        .unwrap();

    match outcome {
        SearchOutcome::Redirected { path, recipe } => {
            assert_eq!(path, "/recipes/drink/11007");
            assert_eq!(recipe.alcoholic.as_deref(), Some("Alcoholic"));
        }
        other => panic!("Expected redirect, got {:?}", other),
    }
    assert_eq!(navigator.location(), "/recipes/drink/11007");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_first_letter_reports_notice() {
    let server = Server::new_async().await;
    let config = config_for(&server.url());
    let state = AppState::default();
    let dispatcher = Arc::new(SearchDispatcher::new(
        Catalog::from_config(&config).unwrap(),
        SearchSlices::from(&state),
        Arc::new(HistoryNavigator::default()),
    ));
    let mut session = SearchSession::new(Category::Food, dispatcher, config.debounce());

    session.set_mode(SearchMode::FirstLetter);
    session.set_text("ab");

    let outcome = timeout(Duration::from_secs(5), session.next_outcome())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(outcome, SearchOutcome::Rejected { .. }));
    assert!(outcome.notice().is_some());
}

#[tokio::test]
async fn test_explore_by_ingredient_over_http() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/meal/list.php")
        .match_query(Matcher::UrlEncoded("i".into(), "list".into()))
        .with_status(200)
        .with_body(
            r#"{"meals":[{"idIngredient":"1","strIngredient":"Chicken","strDescription":null,"strType":null}]}"#,
        )
        .create_async()
        .await;
    let _filter = server
        .mock("GET", "/meal/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "Chicken".into()))
        .with_status(200)
        .with_body(
            r#"{"meals":[
                {"strMeal":"Brown Stew Chicken","strMealThumb":"https://example.com/1.jpg","idMeal":"52940"},
                {"strMeal":"Chicken & mushroom Hotpot","strMealThumb":"https://example.com/2.jpg","idMeal":"52846"}
            ]}"#,
        )
        .create_async()
        .await;

    let config = config_for(&server.url());
    let state = AppState::default();
    let navigator = Arc::new(HistoryNavigator::default());
    let explorer = IngredientExplorer::new(
        Catalog::from_config(&config).unwrap(),
        &config,
        state.clone(),
        navigator.clone(),
    );

    let cards = explorer.ingredients(Category::Food).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(
        cards[0].image_url,
        "https://www.themealdb.com/images/ingredients/Chicken-Small.png"
    );

    let count = explorer.explore(Category::Food, &cards[0].name).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(state.recipes.get().len(), 2);
    assert_eq!(navigator.location(), "/foods");
}
