use crate::api::Catalog;
use crate::config::AppConfig;
use crate::error::SearchError;
use crate::model::Category;
use crate::navigation::Navigator;
use crate::state::AppState;
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;

/// An ingredient card: name plus its thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientCard {
    pub name: String,
    pub image_url: String,
}

/// Browse ingredients and jump to the recipes that use one
pub struct IngredientExplorer {
    catalog: Catalog,
    meal_images: String,
    drink_images: String,
    state: AppState,
    navigator: Arc<dyn Navigator>,
}

impl IngredientExplorer {
    pub fn new(
        catalog: Catalog,
        config: &AppConfig,
        state: AppState,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            catalog,
            meal_images: config.meals.image_base_url.clone(),
            drink_images: config.drinks.image_base_url.clone(),
            state,
            navigator,
        }
    }

    pub fn image_url(&self, category: Category, ingredient: &str) -> String {
        let base = match category {
            Category::Food => &self.meal_images,
            Category::Drink => &self.drink_images,
        };
        format!("{}{}-Small.png", base, ingredient)
    }

    pub async fn ingredients(&self, category: Category) -> Result<Vec<IngredientCard>, SearchError> {
        let names = self.catalog.for_category(category).list_ingredients().await?;
        Ok(names
            .into_iter()
            .map(|name| IngredientCard {
                image_url: self.image_url(category, &name),
                name,
            })
            .collect())
    }

    /// Load every recipe using `ingredient` into the shared list and open the listing view
    pub async fn explore(&self, category: Category, ingredient: &str) -> Result<usize, SearchError> {
        self.state.loading.set(true);
        let api = self.catalog.for_category(category);
        let lookup = match api.search_by_main_ingredient(ingredient).await {
            Ok(lookup) => lookup,
            Err(e) => {
                error!("Exploring {} ingredient {:?} failed: {}", category, ingredient, e);
                self.state.loading.set(false);
                return Err(e);
            }
        };

        let recipes = lookup.results.unwrap_or_default();
        let count = recipes.len();
        info!("{} {} recipes use {}", count, category, ingredient);

        self.state.loading.set(false);
        self.state.recipes.set(recipes);
        self.navigator.push(category.listing_path());
        Ok(count)
    }
}
