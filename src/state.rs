//! Shared view state, split into independently injectable slices.
//!
//! Each slice is a handle onto a `tokio::sync::watch` channel: cloning a slice
//! shares the value, and views that render it can `subscribe` for changes.
//! Components receive only the slices they read or write.

use crate::model::RecipeSummary;
use std::sync::Arc;
use tokio::sync::watch;

/// Get/set/subscribe handle onto one piece of shared state
#[derive(Debug)]
pub struct StateSlice<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateSlice<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> StateSlice<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify subscribers, even with no receiver alive
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for StateSlice<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Every slice the search and explore views share
#[derive(Debug, Clone)]
pub struct AppState {
    /// Recipe list rendered by the listing views
    pub recipes: StateSlice<Vec<RecipeSummary>>,
    /// A remote lookup is in progress
    pub loading: StateSlice<bool>,
    /// The listing shows search results rather than the default feed
    pub searching: StateSlice<bool>,
    /// The listing is narrowed by origin
    pub filtering: StateSlice<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            recipes: StateSlice::default(),
            loading: StateSlice::new(true),
            searching: StateSlice::default(),
            filtering: StateSlice::default(),
        }
    }
}
