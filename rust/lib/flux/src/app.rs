use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::router::Router;
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// Flux: the state engine facade.
///
/// ```ignore
/// let flux = Flux::new();
///
/// flux.on("home/save", |path, payload, store| async move {
///     store.set("home/state", HomeState::testing(url));
/// });
///
/// flux.subscribe("home/#", |path, value| {
///     println!("{} changed", path);
/// });
///
/// flux.emit("home/save", SaveServerReq { url }).await;
/// let state = flux.get_as::<HomeState>("home/state");
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read and clone a typed state value.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as::<T>(path)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    ///
    /// If no handler matches, this is a silent no-op.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        debug!(path, "emit");
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to state changes. Called synchronously on the setter's thread.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    /// Direct store access for handlers and tests.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
