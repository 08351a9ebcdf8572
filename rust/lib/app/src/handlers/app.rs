//! App lifecycle and navigation handlers.

use tracing::{debug, info, warn};

use qualicam_flux::StateStore;

use crate::context::AppContext;
use crate::handlers::chapa;
use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(store: &StateStore, ctx: &AppContext) {
    store.set(HomeState::PATH, HomeState {
        server_url: ctx.location.address(),
        connection: Connection::Idle,
        error: None,
    });
    store.set(ScanState::PATH, ScanState::default());
    enter(store, ctx, &Screen::Home);
    test_connection(store, ctx).await;
}

/// Handle `app/navigate`.
pub async fn handle_navigate(req: &NavigateReq, store: &StateStore, ctx: &AppContext) {
    let Some(screen) = Screen::parse(&req.route) else {
        warn!(route = %req.route, "unknown route");
        return;
    };

    let home = store.get_as::<HomeState>(HomeState::PATH).unwrap_or_default();
    if screen.needs_connection() && !home.connection.can_scan() {
        debug!(route = %req.route, connection = ?home.connection, "navigation blocked");
        store.set(HomeState::PATH, HomeState {
            error: Some("Servidor desconectado. Teste a conexão antes de prosseguir.".into()),
            ..home
        });
        return;
    }

    match &screen {
        Screen::Add(id) => store.set(ChapaFormState::ADD_PATH, ChapaFormState::new(id.as_str())),
        Screen::Edit(id) => store.set(ChapaFormState::EDIT_PATH, ChapaFormState::new(id.as_str())),
        Screen::Home | Screen::Scanner => {}
    }
    enter(store, ctx, &screen);

    if let Screen::Edit(id) = &screen {
        chapa::handle_edit_load(&EditLoadReq { id: id.to_string() }, store, ctx).await;
    }
}

/// Switch screens. Results of work started on the previous screen are
/// discarded from here on.
pub(crate) fn enter(store: &StateStore, ctx: &AppContext, screen: &Screen) {
    let epoch = ctx.bump_epoch();
    if matches!(screen, Screen::Home | Screen::Scanner) {
        store.set(ScanState::PATH, ScanState::default());
    }
    let route = screen.route();
    debug!(route = %route.0, epoch, "navigate");
    store.set(AppRoute::PATH, route);
}

/// Health check against the current address, driving `home/state` through
/// `Testing` to `Connected` or `Disconnected`.
pub(crate) async fn test_connection(store: &StateStore, ctx: &AppContext) {
    let ticket = ctx.next_health_ticket();
    store.update::<HomeState, _>(HomeState::PATH, |home| {
        home.connection = Connection::Testing;
        home.error = None;
    });

    let server = ctx.location.address();
    let result = ctx.api().check_health().await;

    if !ctx.is_latest_health(ticket) {
        warn!(%server, ticket, "discarding superseded connection test");
        return;
    }

    store.update::<HomeState, _>(HomeState::PATH, |home| match &result {
        Ok(()) => {
            info!(%server, "server connected");
            home.connection = Connection::Connected;
            home.error = None;
        }
        Err(e) => {
            warn!(%server, error = %e, "server unreachable");
            home.connection = Connection::Disconnected;
            home.error = Some(format!("Erro de conexão: {}", e));
        }
    });
}
