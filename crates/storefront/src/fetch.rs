//! Asynchronous list-fetch lifecycle with stale-response suppression.
//!
//! A [`ListFetchController`] tracks one list retrieval keyed by a dependency
//! value (a category slug, `()` for an unparameterized list). Every key
//! change starts a new fetch cycle identified by a monotonically increasing
//! generation number. When a fetch resolves, its result is applied only if
//! its generation is still the current one; anything older is dropped
//! without touching state.
//!
//! Cancellation is cooperative. Superseding or tearing down a cycle does not
//! abort the underlying request, it only guarantees the result is ignored. A
//! fetch that never resolves leaves the controller in `Loading`.
//!
//! # Example
//!
//! ```rust,ignore
//! let products = ListFetchController::new("category-products", "Unable to load products.");
//!
//! // Both fetches are in flight; only the "shoes" result can land.
//! tokio::join!(
//!     products.load("bags".to_string(), |slug| catalog.fetch_products_by_category(&slug, &query)),
//!     products.load("shoes".to_string(), |slug| catalog.fetch_products_by_category(&slug, &query)),
//! );
//! ```

use std::fmt::{self, Debug, Display};
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

/// Observable state of a list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// No fetch has been requested yet.
    Idle,
    /// A fetch for the current key is in flight.
    Loading,
    /// The current key's fetch succeeded; data is exactly what was returned.
    Success(Vec<T>),
    /// The current key's fetch failed.
    Error(String),
}

impl<T> FetchState<T> {
    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded items. Empty unless the state is `Success`.
    #[must_use]
    pub fn data(&self) -> &[T] {
        match self {
            Self::Success(items) => items,
            Self::Idle | Self::Loading | Self::Error(_) => &[],
        }
    }

    /// Failure message, if the state is `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Idle | Self::Loading | Self::Success(_) => None,
        }
    }
}

/// Point-in-time view of a controller: the state and the key it belongs to.
#[derive(Debug, Clone)]
pub struct FetchSnapshot<K, T> {
    generation: u64,
    key: Option<K>,
    state: FetchState<T>,
}

impl<K, T> FetchSnapshot<K, T> {
    /// Generation of the most recently started cycle.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Key of the active cycle. `None` before the first request and after
    /// teardown.
    #[must_use]
    pub const fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }
}

/// Token for one fetch cycle, handed out by [`ListFetchController::begin`]
/// and consumed by [`ListFetchController::resolve`].
#[derive(Debug)]
#[must_use = "a fetch cycle that is never resolved leaves the controller loading"]
pub struct FetchCycle<K> {
    generation: u64,
    key: K,
}

impl<K> FetchCycle<K> {
    /// Key this cycle was started for.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Generation number of this cycle.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Fetch lifecycle controller for one list.
///
/// Cheaply cloneable; clones share the same state. Display surfaces observe
/// it through [`subscribe`](Self::subscribe) or [`state`](Self::state).
pub struct ListFetchController<K, T> {
    inner: Arc<ControllerInner<K, T>>,
}

struct ControllerInner<K, T> {
    label: &'static str,
    fallback_message: String,
    shared: watch::Sender<FetchSnapshot<K, T>>,
}

impl<K, T> Clone for ListFetchController<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> Debug for ListFetchController<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListFetchController")
            .field("label", &self.inner.label)
            .field("generation", &self.inner.shared.borrow().generation)
            .finish_non_exhaustive()
    }
}

impl<K, T> ListFetchController<K, T>
where
    K: Clone + PartialEq + Debug,
{
    /// Create an idle controller.
    ///
    /// `label` names the list in log events. `fallback_message` is surfaced
    /// when a failure carries no description of its own.
    #[must_use]
    pub fn new(label: &'static str, fallback_message: impl Into<String>) -> Self {
        let (shared, _) = watch::channel(FetchSnapshot {
            generation: 0,
            key: None,
            state: FetchState::Idle,
        });
        Self {
            inner: Arc::new(ControllerInner {
                label,
                fallback_message: fallback_message.into(),
                shared,
            }),
        }
    }

    /// Message used for failures without a description.
    #[must_use]
    pub fn fallback_message(&self) -> &str {
        &self.inner.fallback_message
    }

    /// Clone of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.inner.shared.borrow().state.clone()
    }

    /// Clone of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FetchSnapshot<K, T>
    where
        T: Clone,
    {
        self.inner.shared.borrow().clone()
    }

    /// Key of the active cycle. `None` before the first request and after
    /// teardown.
    #[must_use]
    pub fn key(&self) -> Option<K> {
        self.inner.shared.borrow().key.clone()
    }

    /// Receiver notified on every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot<K, T>> {
        self.inner.shared.subscribe()
    }

    /// Request data for `key`.
    ///
    /// If `key` differs from the active key, a new cycle starts: the
    /// previous cycle becomes stale and the state moves to `Loading` before
    /// this returns. Requesting the active key again returns `None` and
    /// changes nothing.
    pub fn begin(&self, key: K) -> Option<FetchCycle<K>> {
        let mut started = None;
        self.inner.shared.send_if_modified(|snapshot| {
            if snapshot.key.as_ref() == Some(&key) {
                return false;
            }
            snapshot.generation += 1;
            snapshot.key = Some(key.clone());
            snapshot.state = FetchState::Loading;
            started = Some(FetchCycle {
                generation: snapshot.generation,
                key,
            });
            true
        });

        match &started {
            Some(cycle) => debug!(
                list = self.inner.label,
                key = ?cycle.key,
                generation = cycle.generation,
                "Fetch cycle started"
            ),
            None => debug!(list = self.inner.label, "Key unchanged, fetch skipped"),
        }
        started
    }

    /// Whether `cycle` is still the one allowed to update state.
    #[must_use]
    pub fn is_active(&self, cycle: &FetchCycle<K>) -> bool {
        self.inner.shared.borrow().generation == cycle.generation
    }

    /// Apply the outcome of `cycle`.
    ///
    /// Returns `true` if the outcome was applied, `false` if the cycle had
    /// been superseded or torn down and the outcome was discarded.
    pub fn resolve<E: Display>(&self, cycle: FetchCycle<K>, result: Result<Vec<T>, E>) -> bool {
        let outcome = result.map_err(|err| self.failure_message(&err));
        let failure = outcome.as_ref().err().cloned();

        let applied = self.inner.shared.send_if_modified(|snapshot| {
            if snapshot.generation != cycle.generation {
                return false;
            }
            snapshot.state = match outcome {
                Ok(items) => FetchState::Success(items),
                Err(message) => FetchState::Error(message),
            };
            true
        });

        if !applied {
            debug!(
                list = self.inner.label,
                key = ?cycle.key,
                generation = cycle.generation,
                "Stale fetch result discarded"
            );
        } else if let Some(message) = failure {
            warn!(
                list = self.inner.label,
                key = ?cycle.key,
                error = %message,
                "Failed to load list"
            );
        }
        applied
    }

    /// Start a cycle for `key`, await `fetch`, and apply its result.
    ///
    /// `fetch` is only invoked when a new cycle starts. Returns whether the
    /// result was applied.
    pub async fn load<F, Fut, E>(&self, key: K, fetch: F) -> bool
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: Display,
    {
        let Some(cycle) = self.begin(key) else {
            return false;
        };
        let result = fetch(cycle.key.clone()).await;
        self.resolve(cycle, result)
    }

    /// Detach the controller from its consumer.
    ///
    /// The in-flight cycle, if any, becomes stale and the key is forgotten so
    /// the next request always starts a fresh cycle. State is left as is.
    pub fn teardown(&self) {
        self.inner.shared.send_if_modified(|snapshot| {
            snapshot.generation += 1;
            snapshot.key = None;
            false
        });
        debug!(list = self.inner.label, "Fetch controller torn down");
    }

    fn failure_message<E: Display>(&self, err: &E) -> String {
        let message = err.to_string();
        if message.trim().is_empty() {
            self.inner.fallback_message.clone()
        } else {
            message
        }
    }
}
