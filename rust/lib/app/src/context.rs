//! Shared handler context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use qualicam_client::InventoryApi;

use crate::location::ServerLocation;

/// What every handler sees: the server location plus the counters that
/// keep overlapping async work from clobbering newer state.
pub struct AppContext {
    pub location: ServerLocation,
    scanning: AtomicBool,
    epoch: AtomicU64,
    health: AtomicU64,
}

/// Held while a scan lookup is in flight; releases the gate on drop.
pub(crate) struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AppContext {
    pub fn new(location: ServerLocation) -> Self {
        Self {
            location,
            scanning: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            health: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> Arc<dyn InventoryApi> {
        self.location.client()
    }

    /// Claim the scan gate. `None` while another lookup holds it.
    pub(crate) fn try_begin_scan(&self) -> Option<ScanGuard<'_>> {
        self.scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanGuard(&self.scanning))
    }

    /// Current screen epoch. Bumped on every navigation.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub(crate) fn bump_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// Ticket for a new connection test; older tickets become stale.
    pub(crate) fn next_health_ticket(&self) -> u64 {
        self.health.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn is_latest_health(&self, ticket: u64) -> bool {
        self.health.load(Ordering::Acquire) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeInventory;
    use qualicam_kv::MemoryStore;

    fn context() -> AppContext {
        let location = ServerLocation::open(
            Arc::new(MemoryStore::new()),
            Arc::new(|_: &qualicam_client::Endpoint| -> Result<Arc<dyn InventoryApi>, qualicam_client::ApiError> {
                let api: Arc<dyn InventoryApi> = Arc::new(FakeInventory::default());
                Ok(api)
            }),
        )
        .unwrap();
        AppContext::new(location)
    }

    #[test]
    fn scan_gate_admits_one_at_a_time() {
        let ctx = context();
        let first = ctx.try_begin_scan();
        assert!(first.is_some());
        assert!(ctx.try_begin_scan().is_none());
        drop(first);
        assert!(ctx.try_begin_scan().is_some());
    }

    #[test]
    fn epochs_and_tickets_supersede() {
        let ctx = context();
        let epoch = ctx.epoch();
        assert!(ctx.is_current(epoch));
        ctx.bump_epoch();
        assert!(!ctx.is_current(epoch));

        let old = ctx.next_health_ticket();
        let new = ctx.next_health_ticket();
        assert!(!ctx.is_latest_health(old));
        assert!(ctx.is_latest_health(new));
    }
}
