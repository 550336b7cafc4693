use crate::api::RecipeApi;
use crate::error::SearchError;
use crate::model::{Lookup, Query, SearchMode};

/// One of the three remote lookups, with its argument already prepared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOperation {
    ByName(String),
    ByMainIngredient(String),
    ByFirstLetter(String),
}

impl RemoteOperation {
    /// Choose the lookup for a settled query.
    ///
    /// First-letter searches longer than one character are rejected here so
    /// no request is ever made for them.
    pub fn plan(query: &Query) -> Result<Self, SearchError> {
        match query.mode {
            SearchMode::Name => Ok(RemoteOperation::ByName(query.text.clone())),
            SearchMode::Ingredient => Ok(RemoteOperation::ByMainIngredient(
                normalize_ingredient(&query.text),
            )),
            SearchMode::FirstLetter => {
                if query.text.chars().count() > 1 {
                    return Err(SearchError::InvalidQuery(
                        "Your search must contain only 1 (one) character".to_string(),
                    ));
                }
                Ok(RemoteOperation::ByFirstLetter(query.text.clone()))
            }
        }
    }

    pub async fn execute(&self, api: &dyn RecipeApi) -> Result<Lookup, SearchError> {
        match self {
            RemoteOperation::ByName(name) => api.search_by_name(name).await,
            RemoteOperation::ByMainIngredient(ingredient) => {
                api.search_by_main_ingredient(ingredient).await
            }
            RemoteOperation::ByFirstLetter(letter) => api.search_by_first_letter(letter).await,
        }
    }
}

/// "Light Rum" -> "light_rum", the form the filter endpoint expects
pub fn normalize_ingredient(ingredient: &str) -> String {
    ingredient.replace(' ', "_").to_lowercase()
}
