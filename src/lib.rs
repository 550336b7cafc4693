pub mod api;
pub mod config;
pub mod debounce;
pub mod dispatcher;
pub mod error;
pub mod explore;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod session;
pub mod state;
pub mod uniffi_bindings;

pub use api::{Catalog, RecipeApi, RecipeDbClient, RemoteOperation};
pub use config::AppConfig;
pub use debounce::Debouncer;
pub use dispatcher::{NoResultsCause, SearchDispatcher, SearchOutcome, SearchSlices};
pub use error::SearchError;
pub use explore::{IngredientCard, IngredientExplorer};
pub use filter::{filter_by_origin, origin_options, OriginFilter};
pub use model::{Category, Lookup, Origin, Query, RecipeSummary, SearchMode};
pub use navigation::{HistoryNavigator, Navigator};
pub use session::SearchSession;
pub use state::{AppState, StateSlice};

/// One-shot search without debouncing, navigation or shared state.
///
/// Loads configuration from `config.toml` / `RECIPES__*` variables.
/// No matches and a null payload both yield an empty list.
///
/// # Example
/// ```no_run
/// # use recipe_finder::{search_recipes, Category, Query, SearchMode};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = search_recipes(Category::Drink, &Query::new("Light Rum", SearchMode::Ingredient)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    category: Category,
    query: &Query,
) -> Result<Vec<RecipeSummary>, SearchError> {
    let config = AppConfig::load()?;
    search_recipes_with_config(&config, category, query).await
}

/// Same as [`search_recipes`] with explicit configuration
pub async fn search_recipes_with_config(
    config: &AppConfig,
    category: Category,
    query: &Query,
) -> Result<Vec<RecipeSummary>, SearchError> {
    if query.is_empty() {
        return Err(SearchError::InvalidQuery(
            "Search text cannot be empty".to_string(),
        ));
    }
    let operation = RemoteOperation::plan(query)?;
    let catalog = Catalog::from_config(config)?;
    let lookup = operation.execute(catalog.for_category(category)).await?;
    Ok(lookup.results.unwrap_or_default())
}
