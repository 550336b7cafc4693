//! UniFFI bindings for recipe-finder
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;

use crate::{AppConfig, Catalog, Category, Query, RecipeSummary, SearchError, SearchMode};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe summary
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    /// Empty string if the API did not report one
    pub category: String,
    pub area: Option<String>,
    pub alcoholic: Option<String>,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(recipe: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: recipe.id,
            name: recipe.name,
            thumbnail_url: recipe.thumbnail_url,
            category: recipe.category.unwrap_or_default(),
            area: recipe.area,
            alcoholic: recipe.alcoholic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiCategory {
    Food,
    Drink,
}

impl From<FfiCategory> for Category {
    fn from(category: FfiCategory) -> Self {
        match category {
            FfiCategory::Food => Category::Food,
            FfiCategory::Drink => Category::Drink,
        }
    }
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiSearchMode {
    Name,
    Ingredient,
    FirstLetter,
}

impl From<FfiSearchMode> for SearchMode {
    fn from(mode: FfiSearchMode) -> Self {
        match mode {
            FfiSearchMode::Name => SearchMode::Name,
            FfiSearchMode::Ingredient => SearchMode::Ingredient,
            FfiSearchMode::FirstLetter => SearchMode::FirstLetter,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiSearchError {
    FetchError { message: String },
    InvalidQuery { message: String },
    Unsupported { message: String },
    ConfigError { message: String },
    RuntimeError { message: String },
}

impl fmt::Display for FfiSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiSearchError::FetchError { message } => write!(f, "Fetch error: {}", message),
            FfiSearchError::InvalidQuery { message } => write!(f, "Invalid query: {}", message),
            FfiSearchError::Unsupported { message } => write!(f, "Unsupported: {}", message),
            FfiSearchError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiSearchError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiSearchError {}

impl From<SearchError> for FfiSearchError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::FetchError(e) => FfiSearchError::FetchError {
                message: e.to_string(),
            },
            SearchError::DecodeError(e) => FfiSearchError::FetchError {
                message: e.to_string(),
            },
            SearchError::InvalidQuery(message) => FfiSearchError::InvalidQuery { message },
            SearchError::Unsupported(message) => FfiSearchError::Unsupported { message },
            SearchError::ConfigError(e) => FfiSearchError::ConfigError {
                message: e.to_string(),
            },
            SearchError::RuntimeError(message) => FfiSearchError::RuntimeError { message },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiSearchError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiSearchError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn load_catalog() -> Result<Catalog, FfiSearchError> {
    let config = AppConfig::load().map_err(SearchError::from)?;
    Ok(Catalog::from_config(&config)?)
}

/// Search one database
///
/// # Returns
/// Matching recipes; empty when nothing matched
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    category: FfiCategory,
    mode: FfiSearchMode,
    text: String,
) -> Result<Vec<FfiRecipeSummary>, FfiSearchError> {
    let config = AppConfig::load().map_err(SearchError::from)?;
    let query = Query::new(text, mode.into());
    let rt = create_runtime()?;
    let recipes = rt.block_on(crate::search_recipes_with_config(
        &config,
        category.into(),
        &query,
    ))?;
    Ok(recipes.into_iter().map(FfiRecipeSummary::from).collect())
}

/// Areas meals can be filtered by
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn list_areas() -> Result<Vec<String>, FfiSearchError> {
    let catalog = load_catalog()?;
    let rt = create_runtime()?;
    let areas = rt.block_on(catalog.for_category(Category::Food).list_areas())?;
    Ok(areas)
}

/// Ingredient names for one database
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn list_ingredients(category: FfiCategory) -> Result<Vec<String>, FfiSearchError> {
    let catalog = load_catalog()?;
    let rt = create_runtime()?;
    let ingredients = rt.block_on(catalog.for_category(category.into()).list_ingredients())?;
    Ok(ingredients)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_recipe_conversion() {
        let recipe = RecipeSummary {
            id: "11007".to_string(),
            name: "Margarita".to_string(),
            thumbnail_url: "https://example.com/margarita.jpg".to_string(),
            category: None,
            area: None,
            alcoholic: Some("Alcoholic".to_string()),
        };

        let ffi: FfiRecipeSummary = recipe.into();
        assert_eq!(ffi.id, "11007");
        assert_eq!(ffi.category, "");
        assert_eq!(ffi.alcoholic.as_deref(), Some("Alcoholic"));
    }

    #[test]
    fn test_error_mapping() {
        let err: FfiSearchError = SearchError::InvalidQuery("too long".to_string()).into();
        assert!(matches!(err, FfiSearchError::InvalidQuery { .. }));
        assert_eq!(err.to_string(), "Invalid query: too long");
    }

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
