use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::NewsApi;
use crate::app::FetchError;
use crate::domain::SearchResult;
use crate::routing::RouteParams;
use crate::scheduler::{self, lock, ScheduledTask};
use crate::search::state::{LifecycleState, ERROR_MESSAGE, LOADING_MESSAGES};

/// Spacing between loading message rotations.
pub const MESSAGE_INTERVAL: Duration = Duration::from_millis(2000);

struct LifecycleInner {
    /// Bumped by every `start` and by `shutdown`. Only the fetch tagged with
    /// the current generation may change the state.
    generation: u64,
    query: Option<String>,
    ticker: Option<ScheduledTask>,
    fetch: Option<ScheduledTask>,
    state_tx: watch::Sender<LifecycleState>,
}

/// Owns the fetch and the loading heartbeat for one search view.
///
/// Starting a new query supersedes the previous one: its request and timer
/// are cancelled, and a response that still arrives for it is discarded.
pub struct SearchLifecycle {
    api: Arc<dyn NewsApi>,
    inner: Arc<Mutex<LifecycleInner>>,
}

impl SearchLifecycle {
    /// Create a lifecycle for the given route. Starts loading right away if
    /// the route carries a non-blank query, otherwise stays `Idle`.
    pub fn new(api: Arc<dyn NewsApi>, params: &RouteParams) -> Self {
        let (state_tx, _) = watch::channel(LifecycleState::Idle);
        let lifecycle = Self {
            api,
            inner: Arc::new(Mutex::new(LifecycleInner {
                generation: 0,
                query: None,
                ticker: None,
                fetch: None,
                state_tx,
            })),
        };
        lifecycle.sync(params);
        lifecycle
    }

    /// Begin fetching `query`. Blank queries are ignored and return false.
    pub fn start(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring blank search query");
            return false;
        }

        let superseded = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            let generation = inner.generation;
            inner.query = Some(query.to_string());

            let superseded = (inner.ticker.take(), inner.fetch.take());
            inner
                .state_tx
                .send_replace(LifecycleState::Loading { message_index: 0 });

            let weak = Arc::downgrade(&self.inner);
            inner.ticker = Some(scheduler::schedule_repeating(MESSAGE_INTERVAL, move || {
                rotate_message(&weak, generation)
            }));

            let weak = Arc::downgrade(&self.inner);
            let api = self.api.clone();
            let owned_query = query.to_string();
            inner.fetch = Some(scheduler::spawn(async move {
                let outcome = api.search(&owned_query).await;
                if let Some(inner) = weak.upgrade() {
                    apply_outcome(&inner, generation, &owned_query, outcome);
                }
            }));

            info!("Searching for {:?} (generation {})", query, generation);
            superseded
        };
        drop(superseded);
        true
    }

    /// Re-issue the last query. Returns false if nothing was searched yet.
    pub fn retry(&self) -> bool {
        match self.query() {
            Some(query) => self.start(&query),
            None => false,
        }
    }

    /// Follow the current route: start a search when its query differs from
    /// the one already shown.
    pub fn sync(&self, params: &RouteParams) -> bool {
        let wanted = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        match wanted {
            Some(query) if self.query().as_deref() != Some(query) => self.start(query),
            _ => false,
        }
    }

    /// Cancel the pending request and timer. The current state is kept.
    pub fn shutdown(&self) {
        let cancelled = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            (inner.ticker.take(), inner.fetch.take())
        };
        drop(cancelled);
    }

    pub fn state(&self) -> LifecycleState {
        lock(&self.inner).state_tx.borrow().clone()
    }

    pub fn query(&self) -> Option<String> {
        lock(&self.inner).query.clone()
    }

    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.state().loading_message()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        lock(&self.inner).state_tx.subscribe()
    }

    #[cfg(test)]
    fn apply(&self, generation: u64, outcome: Result<SearchResult, FetchError>) -> bool {
        let query = self.query().unwrap_or_default();
        apply_outcome(&self.inner, generation, &query, outcome)
    }
}

impl Drop for SearchLifecycle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn rotate_message(weak: &Weak<Mutex<LifecycleInner>>, generation: u64) -> ControlFlow<()> {
    let Some(inner) = weak.upgrade() else {
        return ControlFlow::Break(());
    };
    let inner = lock(&inner);
    if inner.generation != generation {
        return ControlFlow::Break(());
    }

    let rotated = inner.state_tx.send_if_modified(|state| match state {
        LifecycleState::Loading { message_index } => {
            *message_index = (*message_index + 1) % LOADING_MESSAGES.len();
            true
        }
        _ => false,
    });

    if rotated {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}

/// Apply a settled fetch. Returns false when the result belongs to a
/// superseded generation and was dropped.
fn apply_outcome(
    inner: &Mutex<LifecycleInner>,
    generation: u64,
    query: &str,
    outcome: Result<SearchResult, FetchError>,
) -> bool {
    let finished = {
        let mut inner = lock(inner);
        if inner.generation != generation {
            debug!(
                "Discarding stale result for {:?} (generation {}, current {})",
                query, generation, inner.generation
            );
            return false;
        }

        let state = match outcome {
            Ok(result) => {
                info!("Search for {:?} returned {} paragraphs", query, result.content.len());
                LifecycleState::Success {
                    result: Arc::new(result),
                }
            }
            Err(FetchError::EmptyResult) => {
                info!("No results for {:?}", query);
                LifecycleState::Success {
                    result: Arc::new(SearchResult::default()),
                }
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", query, e);
                LifecycleState::Error {
                    message: ERROR_MESSAGE.to_string(),
                }
            }
        };

        let finished = (inner.ticker.take(), inner.fetch.take());
        inner.state_tx.send_replace(state);
        finished
    };
    drop(finished);
    true
}
