//! Landing screen handlers.

use tracing::warn;

use qualicam_flux::StateStore;

use crate::context::AppContext;
use crate::handlers::app::test_connection;
use crate::request::*;
use crate::state::*;

/// Handle `home/save`.
pub async fn handle_save(req: &SaveServerReq, store: &StateStore, ctx: &AppContext) {
    match ctx.location.save(&req.url) {
        Ok(endpoint) => {
            store.update::<HomeState, _>(HomeState::PATH, |home| {
                home.server_url = endpoint.to_string();
            });
            test_connection(store, ctx).await;
        }
        Err(e) => {
            warn!(url = %req.url, error = %e, "server address not saved");
            store.update::<HomeState, _>(HomeState::PATH, |home| {
                home.error = Some(format!("Erro ao salvar configurações: {}", e));
            });
        }
    }
}
