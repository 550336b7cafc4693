use crate::api::RecipeApi;
use crate::error::SearchError;
use crate::model::{Category, Lookup, RecipeSummary};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for TheMealDB / TheCocktailDB, which share one URL layout
pub struct RecipeDbClient {
    client: Client,
    category: Category,
    base_url: String,
}

#[derive(Deserialize)]
struct AreaRecord {
    #[serde(rename = "strArea")]
    area: String,
}

#[derive(Deserialize)]
struct IngredientRecord {
    // Meals list `strIngredient`, drinks list `strIngredient1`
    #[serde(alias = "strIngredient", alias = "strIngredient1")]
    name: String,
}

impl RecipeDbClient {
    pub fn new(
        category: Category,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, SearchError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            category,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and decode the category's collection field.
    ///
    /// A null, missing or non-array field decodes as `None`; some endpoints
    /// answer "no data found" as a bare string instead of null.
    async fn get_collection<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<Vec<T>>, SearchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let mut body: Value = response.json().await?;
        match body.get_mut(self.category.collection_key()).map(Value::take) {
            Some(items @ Value::Array(_)) => Ok(Some(serde_json::from_value(items)?)),
            other => {
                debug!("No {} in response: {:?}", self.category.collection_key(), other);
                Ok(None)
            }
        }
    }

    async fn lookup(&self, endpoint: &str, key: &str, value: &str) -> Result<Lookup, SearchError> {
        let results = self
            .get_collection::<RecipeSummary>(endpoint, &[(key, value)])
            .await?;
        Ok(Lookup::new(self.category, results))
    }
}

#[async_trait]
impl RecipeApi for RecipeDbClient {
    fn category(&self) -> Category {
        self.category
    }

    async fn search_by_name(&self, name: &str) -> Result<Lookup, SearchError> {
        self.lookup("search.php", "s", name).await
    }

    async fn search_by_first_letter(&self, letter: &str) -> Result<Lookup, SearchError> {
        self.lookup("search.php", "f", letter).await
    }

    async fn search_by_main_ingredient(&self, ingredient: &str) -> Result<Lookup, SearchError> {
        self.lookup("filter.php", "i", ingredient).await
    }

    async fn list_areas(&self) -> Result<Vec<String>, SearchError> {
        if self.category == Category::Drink {
            return Err(SearchError::Unsupported(
                "Areas are not available for drinks".to_string(),
            ));
        }
        let areas = self
            .get_collection::<AreaRecord>("list.php", &[("a", "list")])
            .await?
            .unwrap_or_default();
        Ok(areas.into_iter().map(|a| a.area).collect())
    }

    async fn list_ingredients(&self) -> Result<Vec<String>, SearchError> {
        let ingredients = self
            .get_collection::<IngredientRecord>("list.php", &[("i", "list")])
            .await?
            .unwrap_or_default();
        Ok(ingredients.into_iter().map(|i| i.name).collect())
    }
}
