//! Scan router: barcode payload → add or edit.

use qualicam_client::{ApiError, Chapa, ItemId};

use crate::state::Screen;

/// Where a scanned id leads.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// No record yet: open the add form.
    Add(ItemId),
    /// Record exists: open the edit form.
    Edit(ItemId),
    /// Lookup failed; stay on the scanner.
    Failed(String),
}

impl ScanOutcome {
    pub fn screen(&self) -> Option<Screen> {
        match self {
            ScanOutcome::Add(id) => Some(Screen::Add(id.clone())),
            ScanOutcome::Edit(id) => Some(Screen::Edit(id.clone())),
            ScanOutcome::Failed(_) => None,
        }
    }
}

/// Boundary filter: only exactly-5-ASCII-digit payloads become ids.
pub fn accept_scan(code: &str) -> Option<ItemId> {
    ItemId::parse(code).ok()
}

/// Decide the outcome from the chapa lookup.
pub fn route_for(id: ItemId, lookup: &Result<Option<Chapa>, ApiError>) -> ScanOutcome {
    match lookup {
        Ok(Some(_)) => ScanOutcome::Edit(id),
        Ok(None) => ScanOutcome::Add(id),
        Err(e) => ScanOutcome::Failed(format!("Erro ao verificar chapa: {}", e)),
    }
}
