use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Wraps `Arc<dyn Any + Send + Sync>` so that the store, subscribers and the
/// rendering layer all share one allocation. Clone is an atomic increment.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Downcast to a concrete type. `None` if the stored type differs.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Downcast and clone out the concrete value.
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Number of strong references to the shared value.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Handle returned by `StateStore::subscribe()`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
