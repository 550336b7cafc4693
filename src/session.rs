use crate::debounce::{DebounceInput, Debouncer};
use crate::dispatcher::{SearchDispatcher, SearchOutcome};
use crate::model::{Category, Query, SearchMode};
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

/// A live search bar for one category.
///
/// Edits go through the debouncer; every settled query is dispatched on its
/// own task so a newer query can supersede one still in flight. Dropping the
/// session stops the debounce timer and abandons pending lookups.
pub struct SearchSession {
    category: Category,
    query: Query,
    input: DebounceInput<Query>,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    runner: JoinHandle<()>,
}

impl SearchSession {
    pub fn new(category: Category, dispatcher: Arc<SearchDispatcher>, quiet: Duration) -> Self {
        let debouncer = Debouncer::new(quiet);
        let input = debouncer.input();
        let (tx, outcomes) = mpsc::unbounded_channel();
        let runner = tokio::spawn(run(category, debouncer, dispatcher, tx));

        Self {
            category,
            query: Query::default(),
            input,
            outcomes,
            runner,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.input.push(self.query.clone());
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.query.mode = mode;
        self.input.push(self.query.clone());
    }

    /// Next outcome of a settled query, in completion order
    pub async fn next_outcome(&mut self) -> Option<SearchOutcome> {
        self.outcomes.recv().await
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.runner.abort();
    }
}

async fn run(
    category: Category,
    mut debouncer: Debouncer<Query>,
    dispatcher: Arc<SearchDispatcher>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
) {
    // Dropped with the runner, which aborts whatever is still in flight
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            settled = debouncer.next_settled() => match settled {
                Some(query) => {
                    debug!("Settled {} query {:?}", category, query);
                    let dispatcher = Arc::clone(&dispatcher);
                    in_flight.spawn(async move { dispatcher.dispatch(category, &query).await });
                }
                None => break,
            },
            Some(done) = in_flight.join_next() => {
                if let Ok(outcome) = done {
                    if outcomes.send(outcome).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Catalog;
    use crate::dispatcher::tests::{recipe, FakeApi};
    use crate::dispatcher::SearchSlices;
    use crate::navigation::HistoryNavigator;
    use crate::state::AppState;
    use tokio::sync::Notify;
    use tokio::time::{sleep, timeout};

    const QUIET: Duration = Duration::from_millis(600);

    fn dispatcher(meals: Arc<FakeApi>) -> (Arc<SearchDispatcher>, AppState) {
        let state = AppState::default();
        let catalog = Catalog::new(meals, Arc::new(FakeApi::new(Category::Drink)));
        let dispatcher = Arc::new(SearchDispatcher::new(
            catalog,
            SearchSlices::from(&state),
            Arc::new(HistoryNavigator::new("/foods")),
        ));
        (dispatcher, state)
    }

    fn session(meals: Arc<FakeApi>) -> (SearchSession, AppState) {
        let (dispatcher, state) = dispatcher(meals);
        (SearchSession::new(Category::Food, dispatcher, QUIET), state)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_dispatches_once() {
        let meals = Arc::new(FakeApi::new(Category::Food).answer(
            "name:Pie",
            vec![recipe("1", "Apple Pie", None), recipe("2", "Fish Pie", None)],
        ));
        let (mut session, state) = session(meals.clone());

        for text in ["P", "Pi", "Pie"] {
            session.set_text(text);
            sleep(Duration::from_millis(150)).await;
        }

        let outcome = session.next_outcome().await.unwrap();
        assert!(matches!(outcome, SearchOutcome::Listed { count: 2, .. }));
        assert_eq!(meals.calls(), vec!["name:Pie"]);
        assert_eq!(state.recipes.get().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_change_redispatches() {
        let meals = Arc::new(FakeApi::new(Category::Food));
        let (mut session, _) = session(meals.clone());

        session.set_text("c");
        session.next_outcome().await.unwrap();
        session.set_mode(SearchMode::FirstLetter);
        session.next_outcome().await.unwrap();

        assert_eq!(meals.calls(), vec!["name:c", "letter:c"]);
        assert_eq!(session.query(), &Query::new("c", SearchMode::FirstLetter));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_text_suspends() {
        let meals = Arc::new(FakeApi::new(Category::Food));
        let (mut session, state) = session(meals.clone());

        session.set_text("x");
        session.next_outcome().await.unwrap();
        assert!(state.searching.get());

        session.set_text("");
        assert_eq!(session.next_outcome().await, Some(SearchOutcome::Suspended));
        assert!(!state.searching.get());
        assert_eq!(meals.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_search() {
        let meals = Arc::new(FakeApi::new(Category::Food));
        let (mut session, _) = session(meals.clone());

        session.set_text("Pie");
        sleep(Duration::from_millis(100)).await;
        drop(session);

        sleep(Duration::from_secs(5)).await;
        assert!(meals.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_outcome_without_input() {
        let (mut session, _) = session(Arc::new(FakeApi::new(Category::Food)));
        let outcome = timeout(Duration::from_secs(5), session.next_outcome()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_after_drop_mid_request() {
        let hold = Arc::new(Notify::new());
        let meals = Arc::new(FakeApi {
            hold: Some(hold.clone()),
            ..FakeApi::new(Category::Food)
        });
        let (dispatcher, state) = dispatcher(meals.clone());

        let mut first = SearchSession::new(Category::Food, dispatcher.clone(), QUIET);
        first.set_text("Pie");
        while meals.calls().is_empty() {
            sleep(Duration::from_millis(100)).await;
        }
        assert!(state.loading.get());

        drop(first);
        for _ in 0..100 {
            if !state.loading.get() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!state.loading.get());

        let mut second = SearchSession::new(Category::Food, dispatcher, QUIET);
        hold.notify_one();
        second.set_text("Pie");

        let outcome = second.next_outcome().await.unwrap();
        assert!(matches!(outcome, SearchOutcome::NoResults { .. }));
        assert_eq!(meals.calls(), vec!["name:Pie", "name:Pie"]);
    }
}
