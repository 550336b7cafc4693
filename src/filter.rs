use crate::api::RecipeApi;
use crate::error::SearchError;
use crate::model::{Category, Origin, RecipeSummary};
use crate::state::StateSlice;
use log::debug;

/// Keep only the recipes from `origin`; `Origin::All` keeps everything
pub fn filter_by_origin(recipes: &[RecipeSummary], origin: &Origin) -> Vec<RecipeSummary> {
    match origin {
        Origin::All => recipes.to_vec(),
        Origin::Area(area) => recipes
            .iter()
            .filter(|r| r.area.as_deref() == Some(area.as_str()))
            .cloned()
            .collect(),
    }
}

/// Choices for the origin selector: `All` followed by every food area
pub async fn origin_options(api: &dyn RecipeApi) -> Result<Vec<Origin>, SearchError> {
    if api.category() != Category::Food {
        return Err(SearchError::Unsupported(
            "Exploring by origin is not available for drinks".to_string(),
        ));
    }
    let areas = api.list_areas().await?;
    Ok(std::iter::once(Origin::All)
        .chain(areas.into_iter().map(Origin::Area))
        .collect())
}

/// Explore-by-origin view over the shared recipe list.
///
/// Keeps the unfiltered source so switching back to `All` restores it, and
/// republishes the filtered view whenever the source or selection changes.
/// Dropping the filter empties the shared list.
pub struct OriginFilter {
    source: Vec<RecipeSummary>,
    selected: Origin,
    recipes: StateSlice<Vec<RecipeSummary>>,
    filtering: StateSlice<bool>,
}

impl OriginFilter {
    /// Starts from the current contents of `recipes` with `All` selected
    pub fn new(recipes: StateSlice<Vec<RecipeSummary>>, filtering: StateSlice<bool>) -> Self {
        let filter = Self {
            source: recipes.get(),
            selected: Origin::All,
            recipes,
            filtering,
        };
        filter.publish();
        filter
    }

    pub fn set_recipes(&mut self, recipes: Vec<RecipeSummary>) {
        self.source = recipes;
        self.publish();
    }

    pub fn select(&mut self, origin: Origin) {
        debug!("Origin selected: {}", origin.label());
        self.selected = origin;
        self.publish();
    }

    pub fn selected(&self) -> &Origin {
        &self.selected
    }

    pub fn view(&self) -> Vec<RecipeSummary> {
        filter_by_origin(&self.source, &self.selected)
    }

    fn publish(&self) {
        self.filtering.set(self.selected != Origin::All);
        self.recipes.set(self.view());
    }
}

impl Drop for OriginFilter {
    fn drop(&mut self) {
        self.recipes.set(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::tests::{recipe, FakeApi};

    fn sample() -> Vec<RecipeSummary> {
        let areas = [
            "Italian", "British", "Italian", "Greek", "Mexican", "Italian", "French", "British",
            "Thai", "Indian",
        ];
        areas
            .iter()
            .enumerate()
            .map(|(i, area)| recipe(&i.to_string(), &format!("Dish {}", i), Some(area)))
            .collect()
    }

    #[test]
    fn test_filter_by_origin() {
        let recipes = sample();
        let italian = filter_by_origin(&recipes, &Origin::Area("Italian".to_string()));
        assert_eq!(italian.len(), 3);
        assert_eq!(filter_by_origin(&recipes, &Origin::All), recipes);
    }

    #[test]
    fn test_select_and_restore() {
        let recipes = StateSlice::new(sample());
        let filtering = StateSlice::new(false);
        let mut filter = OriginFilter::new(recipes.clone(), filtering.clone());

        filter.select(Origin::Area("Italian".to_string()));
        assert_eq!(recipes.get().len(), 3);
        assert!(recipes.get().iter().all(|r| r.area.as_deref() == Some("Italian")));
        assert!(filtering.get());

        filter.select(Origin::All);
        assert_eq!(recipes.get().len(), 10);
        assert!(!filtering.get());
    }

    #[test]
    fn test_recomputes_when_source_changes() {
        let recipes = StateSlice::new(Vec::new());
        let filtering = StateSlice::new(false);
        let mut filter = OriginFilter::new(recipes.clone(), filtering);
        filter.select(Origin::Area("British".to_string()));
        assert!(recipes.get().is_empty());

        filter.set_recipes(sample());
        assert_eq!(recipes.get().len(), 2);
    }

    #[test]
    fn test_drop_clears_shared_list() {
        let recipes = StateSlice::new(sample());
        let filter = OriginFilter::new(recipes.clone(), StateSlice::new(false));
        drop(filter);
        assert!(recipes.get().is_empty());
    }

    #[tokio::test]
    async fn test_origin_options() {
        let api = FakeApi::new(Category::Food);
        let options = origin_options(&api).await.unwrap();
        assert_eq!(options[0], Origin::All);
        assert_eq!(options.len(), 3);
    }

    #[tokio::test]
    async fn test_origin_options_unsupported_for_drinks() {
        let api = FakeApi::new(Category::Drink);
        assert!(matches!(
            origin_options(&api).await,
            Err(SearchError::Unsupported(_))
        ));
    }
}
