use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which recipe database a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Drink,
}

impl Category {
    /// Field of the API payload that carries the results
    pub fn collection_key(&self) -> &'static str {
        match self {
            Category::Food => "meals",
            Category::Drink => "drinks",
        }
    }

    /// Path of the listing view for this category
    pub fn listing_path(&self) -> &'static str {
        match self {
            Category::Food => "/foods",
            Category::Drink => "/drinks",
        }
    }

    /// Path of a single recipe's detail view
    pub fn detail_path(&self, id: &str) -> String {
        format!("/recipes/{}/{}", self.as_str(), id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Drink => "drink",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" | "meal" | "meals" => Ok(Category::Food),
            "drink" | "drinks" | "cocktail" => Ok(Category::Drink),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// How the query text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    #[default]
    Name,
    Ingredient,
    FirstLetter,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Name => "name",
            SearchMode::Ingredient => "ingredient",
            SearchMode::FirstLetter => "first-letter",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SearchMode::Name),
            "ingredient" => Ok(SearchMode::Ingredient),
            "first-letter" | "first_letter" | "letter" => Ok(SearchMode::FirstLetter),
            other => Err(format!("Unknown search mode: {}", other)),
        }
    }
}

/// Live search input: the text box plus the selected radio option
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub text: String,
    pub mode: SearchMode,
}

impl Query {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// Blank text counts as no query at all
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A recipe as listed by the API, decoded verbatim from either database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(alias = "idMeal", alias = "idDrink")]
    pub id: String,
    #[serde(alias = "strMeal", alias = "strDrink")]
    pub name: String,
    #[serde(alias = "strMealThumb", alias = "strDrinkThumb", default)]
    pub thumbnail_url: String,
    #[serde(alias = "strCategory", default)]
    pub category: Option<String>,
    /// Origin, only reported for meals
    #[serde(alias = "strArea", default)]
    pub area: Option<String>,
    /// Only reported for drinks
    #[serde(alias = "strAlcoholic", default)]
    pub alcoholic: Option<String>,
}

/// Result of one remote lookup, tagged with the category that was queried.
/// `results` is `None` when the payload field was null or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub category: Category,
    pub results: Option<Vec<RecipeSummary>>,
}

impl Lookup {
    pub fn new(category: Category, results: Option<Vec<RecipeSummary>>) -> Self {
        Self { category, results }
    }

    /// Collapses "null" and "empty array" into `None`
    pub fn into_non_empty(self) -> Option<Vec<RecipeSummary>> {
        self.results.filter(|r| !r.is_empty())
    }
}

/// Origin selection for the explore-by-area view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    All,
    Area(String),
}

impl Origin {
    pub fn label(&self) -> &str {
        match self {
            Origin::All => "All",
            Origin::Area(area) => area,
        }
    }
}

impl From<&str> for Origin {
    fn from(value: &str) -> Self {
        if value == "All" {
            Origin::All
        } else {
            Origin::Area(value.to_string())
        }
    }
}
