//! Scanner handlers.

use tracing::{debug, info, warn};

use qualicam_flux::StateStore;

use crate::context::AppContext;
use crate::form::ChapaFields;
use crate::handlers::app::enter;
use crate::request::*;
use crate::scan::{ScanOutcome, accept_scan, route_for};
use crate::state::*;

/// Handle `scan/detected`.
pub async fn handle_detected(req: &ScanDetectedReq, store: &StateStore, ctx: &AppContext) {
    let Some(id) = accept_scan(&req.code) else {
        debug!(code = %req.code, "ignoring non-id barcode");
        return;
    };
    let home = store.get_as::<HomeState>(HomeState::PATH).unwrap_or_default();
    let on_scanner = store
        .get_as::<AppRoute>(AppRoute::PATH)
        .and_then(|r| r.screen())
        == Some(Screen::Scanner);
    if !on_scanner || !home.connection.can_scan() {
        debug!(%id, connection = ?home.connection, "scanner not active");
        return;
    }
    let Some(_gate) = ctx.try_begin_scan() else {
        debug!(%id, "lookup already in flight");
        return;
    };

    let epoch = ctx.epoch();
    store.set(ScanState::PATH, ScanState {
        scanning: true,
        last_id: Some(id.to_string()),
        error: None,
    });

    let lookup = ctx.api().get_chapa(id.as_str()).await;

    if !ctx.is_current(epoch) {
        warn!(%id, "discarding lookup for a screen that was left");
        return;
    }

    let outcome = route_for(id.clone(), &lookup);
    let error = match &outcome {
        ScanOutcome::Failed(message) => Some(message.clone()),
        _ => None,
    };
    store.set(ScanState::PATH, ScanState {
        scanning: false,
        last_id: Some(id.to_string()),
        error,
    });

    match (&outcome, lookup) {
        (ScanOutcome::Add(_), _) => {
            info!(%id, "new chapa");
            store.set(ChapaFormState::ADD_PATH, ChapaFormState::new(id.as_str()));
        }
        (ScanOutcome::Edit(_), Ok(Some(chapa))) => {
            info!(%id, "existing chapa");
            store.set(ChapaFormState::EDIT_PATH, ChapaFormState {
                fields: ChapaFields::from_chapa(&chapa),
                ..ChapaFormState::new(id.as_str())
            });
        }
        _ => {}
    }
    if let Some(screen) = outcome.screen() {
        enter(store, ctx, &screen);
    }
}
