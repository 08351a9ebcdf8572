use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::pattern::PatternTable;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-routed change notifications.
///
/// - `set(path, value)` stores a value, then notifies matching subscribers.
/// - `get(path)` / `get_as::<T>(path)` read the current value.
/// - `subscribe(pattern, handler)` registers a change handler.
///
/// Subscribers are called synchronously on the setter's thread, after the
/// new value is visible to `get`.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: PatternTable<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: PatternTable::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built value at `path` and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        let entries = self.handlers.match_topic(path);
        trace!(path, subscribers = entries.len(), "state updated");
        for entry in entries {
            (entry.handler)(path, &value);
        }
    }

    /// Read-modify-write a typed value. `f` receives the current value (or
    /// `default()` if the path is empty or holds another type).
    pub fn update<T, F>(&self, path: &str, f: F) -> T
    where
        T: Any + Send + Sync + Clone + Default,
        F: FnOnce(&mut T),
    {
        let mut current = self.get_as::<T>(path).unwrap_or_default();
        f(&mut current);
        self.set(path, current.clone());
        current
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap();
        values.get(path).cloned()
    }

    /// Read and clone a typed value. `None` if missing or of another type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Remove the value at `path`. Does NOT notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let mut values = self.values.write().unwrap();
        values.remove(path)
    }

    /// All entries strictly below `prefix` (children only), ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        let scan_prefix = format!("{}/", prefix);
        values
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        let values = self.values.read().unwrap();
        values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap();
        values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes at paths matching `pattern`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }

    /// All paths and values, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
