use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::pattern::PatternTable;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased handler stored in the router.
///
/// Takes owned values so the returned future can be `'static`:
/// the matched request path, the type-erased payload, and the store.
type ErasedHandler =
    Arc<dyn Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers.
///
/// Several handlers may match one path; they run sequentially in
/// registration order.
pub struct Router {
    table: PatternTable<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            table: PatternTable::new(),
        }
    }

    /// Register an async handler for a path pattern (`+` / `#` wildcards).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String,
                  payload: Arc<dyn Any + Send + Sync>,
                  store: Arc<StateStore>|
                  -> BoxFuture { Box::pin(handler(path, payload, store)) },
        );
        self.table.insert(pattern, handler);
    }

    /// Dispatch a request to all matching handlers. No match is a no-op.
    pub async fn dispatch(
        &self,
        path: &str,
        payload: Arc<dyn Any + Send + Sync>,
        store: Arc<StateStore>,
    ) {
        let handlers = self.table.match_topic(path);
        if handlers.is_empty() {
            debug!(path, "no handler for request");
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Whether a handler is registered under exactly `pattern`.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.table.has_pattern(pattern)
    }

    /// Whether any handler would match `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.table.match_topic(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
