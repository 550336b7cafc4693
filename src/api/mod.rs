mod operation;
mod recipe_db;

pub use operation::{normalize_ingredient, RemoteOperation};
pub use recipe_db::RecipeDbClient;

use crate::config::AppConfig;
use crate::error::SearchError;
use crate::model::{Category, Lookup};
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only lookups offered by a recipe database
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Category this source serves
    fn category(&self) -> Category;

    /// Recipes whose name matches `name`
    async fn search_by_name(&self, name: &str) -> Result<Lookup, SearchError>;

    /// All recipes starting with `letter`
    async fn search_by_first_letter(&self, letter: &str) -> Result<Lookup, SearchError>;

    /// Recipes using `ingredient` as a main ingredient
    async fn search_by_main_ingredient(&self, ingredient: &str) -> Result<Lookup, SearchError>;

    /// Every known area (origin)
    async fn list_areas(&self) -> Result<Vec<String>, SearchError>;

    /// Every known ingredient name
    async fn list_ingredients(&self) -> Result<Vec<String>, SearchError>;
}

/// The pair of recipe sources, one per category
#[derive(Clone)]
pub struct Catalog {
    meals: Arc<dyn RecipeApi>,
    drinks: Arc<dyn RecipeApi>,
}

impl Catalog {
    pub fn new(meals: Arc<dyn RecipeApi>, drinks: Arc<dyn RecipeApi>) -> Self {
        Self { meals, drinks }
    }

    /// Build HTTP clients for both databases from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let timeout = Some(config.request_timeout());
        let meals = RecipeDbClient::new(Category::Food, &config.meals.base_url, timeout)?;
        let drinks = RecipeDbClient::new(Category::Drink, &config.drinks.base_url, timeout)?;
        Ok(Self::new(Arc::new(meals), Arc::new(drinks)))
    }

    pub fn for_category(&self, category: Category) -> &dyn RecipeApi {
        match category {
            Category::Food => self.meals.as_ref(),
            Category::Drink => self.drinks.as_ref(),
        }
    }
}
