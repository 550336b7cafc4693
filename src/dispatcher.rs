use crate::api::{Catalog, RemoteOperation};
use crate::error::SearchError;
use crate::model::{Category, Lookup, Query, RecipeSummary};
use crate::navigation::Navigator;
use crate::state::{AppState, StateSlice};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Why a search produced nothing to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoResultsCause {
    /// The lookup succeeded with no matches
    Empty,
    /// The lookup failed; shown to the user the same way as `Empty`
    Failed(String),
}

/// What a single dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty text, nothing to search for yet
    Suspended,
    /// Rejected locally, no request made
    Rejected { message: String },
    /// The same query is already in flight
    Busy,
    /// Exactly one match; navigated to its detail view
    Redirected { path: String, recipe: RecipeSummary },
    /// Several matches stored in the recipe list
    Listed { count: usize, path: String },
    /// Nothing to show, either no matches or a failed lookup; the list was cleared
    NoResults {
        category: Category,
        cause: NoResultsCause,
    },
    /// A newer query was issued before this response arrived
    Stale,
}

impl SearchOutcome {
    /// Text the presentation layer should surface, if any
    pub fn notice(&self) -> Option<String> {
        match self {
            SearchOutcome::Rejected { message } => Some(message.clone()),
            SearchOutcome::NoResults { category, .. } => {
                Some(format!("No {} results were found.", category))
            }
            _ => None,
        }
    }
}

/// Slices of shared state the dispatcher writes
#[derive(Debug, Clone)]
pub struct SearchSlices {
    pub recipes: StateSlice<Vec<RecipeSummary>>,
    pub loading: StateSlice<bool>,
    pub searching: StateSlice<bool>,
}

impl From<&AppState> for SearchSlices {
    fn from(state: &AppState) -> Self {
        Self {
            recipes: state.recipes.clone(),
            loading: state.loading.clone(),
            searching: state.searching.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Gate {
    /// Sequence number of the most recently issued request
    latest: u64,
    in_flight: Option<(Category, Query)>,
}

/// Turns settled queries into exactly one remote lookup each and acts on the result
pub struct SearchDispatcher {
    catalog: Catalog,
    slices: SearchSlices,
    navigator: Arc<dyn Navigator>,
    gate: Mutex<Gate>,
}

impl SearchDispatcher {
    pub fn new(catalog: Catalog, slices: SearchSlices, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            catalog,
            slices,
            navigator,
            gate: Mutex::new(Gate::default()),
        }
    }

    pub async fn dispatch(&self, category: Category, query: &Query) -> SearchOutcome {
        if query.is_empty() {
            self.supersede();
            self.slices.searching.set(false);
            return SearchOutcome::Suspended;
        }

        let operation = match RemoteOperation::plan(query) {
            Ok(operation) => operation,
            Err(SearchError::InvalidQuery(message)) => {
                warn!("Rejected {} search {:?}: {}", category, query.text, message);
                self.supersede();
                return SearchOutcome::Rejected { message };
            }
            Err(e) => {
                self.supersede();
                return SearchOutcome::Rejected {
                    message: e.to_string(),
                };
            }
        };

        let seq = {
            let mut gate = self.gate.lock();
            if gate.in_flight.as_ref() == Some(&(category, query.clone())) {
                debug!("{:?} already in flight", query);
                return SearchOutcome::Busy;
            }
            gate.latest += 1;
            gate.in_flight = Some((category, query.clone()));
            gate.latest
        };
        let mut pending = PendingLookup {
            dispatcher: self,
            seq,
            applied: false,
        };

        self.slices.loading.set(true);
        self.slices.searching.set(true);
        debug!("Dispatching #{} {:?} for {}", seq, operation, category);

        let result = operation
            .execute(self.catalog.for_category(category))
            .await;

        // Held while applying so a newer dispatch cannot interleave with the writes
        let mut gate = self.gate.lock();
        if gate.latest != seq {
            debug!("Discarding response #{} (latest is #{})", seq, gate.latest);
            return SearchOutcome::Stale;
        }

        self.slices.loading.set(false);
        let outcome = self.apply(category, result);
        gate.in_flight = None;
        pending.applied = true;
        outcome
    }

    /// Make any lookup still in flight stale. Its `loading` flag is released
    /// since no response will be applied for it.
    fn supersede(&self) {
        let mut gate = self.gate.lock();
        gate.latest += 1;
        if let Some((category, query)) = gate.in_flight.take() {
            debug!("{} query {:?} superseded", category, query);
            self.slices.loading.set(false);
        }
    }

    fn apply(&self, category: Category, result: Result<Lookup, SearchError>) -> SearchOutcome {
        let recipes = match result {
            Ok(lookup) => lookup.into_non_empty(),
            Err(e) => {
                warn!("{} lookup failed: {}", category, e);
                self.slices.recipes.set(Vec::new());
                return SearchOutcome::NoResults {
                    category,
                    cause: NoResultsCause::Failed(e.to_string()),
                };
            }
        };

        match recipes {
            None => {
                info!("No {} results", category);
                self.slices.recipes.set(Vec::new());
                SearchOutcome::NoResults {
                    category,
                    cause: NoResultsCause::Empty,
                }
            }
            Some(mut recipes) if recipes.len() == 1 => {
                let recipe = recipes.remove(0);
                let path = category.detail_path(&recipe.id);
                self.navigator.push(&path);
                SearchOutcome::Redirected { path, recipe }
            }
            Some(recipes) => {
                let count = recipes.len();
                let path = category.listing_path().to_string();
                info!("{} {} results", count, category);
                self.slices.recipes.set(recipes);
                if self.navigator.location() != path {
                    self.navigator.push(&path);
                }
                SearchOutcome::Listed { count, path }
            }
        }
    }
}

/// Re-arms the gate when a dispatch is dropped before its response was applied
struct PendingLookup<'a> {
    dispatcher: &'a SearchDispatcher,
    seq: u64,
    applied: bool,
}

impl Drop for PendingLookup<'_> {
    fn drop(&mut self) {
        if self.applied {
            return;
        }
        let mut gate = self.dispatcher.gate.lock();
        if gate.latest == self.seq {
            debug!("Lookup #{} abandoned", self.seq);
            gate.in_flight = None;
            self.dispatcher.slices.loading.set(false);
        }
    }
}
