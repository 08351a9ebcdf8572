//! Request handlers and Flux wiring.
//!
//! `register_handlers` binds every request path to its handler, downcasting
//! the payload to the request type and handing over the store and context.

pub mod app;
pub mod chapa;
pub mod home;
pub mod scan;

use std::sync::Arc;

use tracing::warn;

use qualicam_flux::{Flux, StateStore};

use crate::context::AppContext;
use crate::request::*;

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<AppContext>) {
    // app/initialize
    {
        let ctx = ctx.clone();
        flux.on(InitializeReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                app::handle_initialize(&store, &ctx).await;
            }
        });
    }

    // app/navigate
    {
        let ctx = ctx.clone();
        flux.on(NavigateReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<NavigateReq>() else {
                    warn!(%path, "unexpected payload");
                    return;
                };
                app::handle_navigate(req, &store, &ctx).await;
            }
        });
    }

    // home/save
    {
        let ctx = ctx.clone();
        flux.on(SaveServerReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<SaveServerReq>() else {
                    warn!(%path, "unexpected payload");
                    return;
                };
                home::handle_save(req, &store, &ctx).await;
            }
        });
    }

    // scan/detected
    {
        let ctx = ctx.clone();
        flux.on(ScanDetectedReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<ScanDetectedReq>() else {
                    warn!(%path, "unexpected payload");
                    return;
                };
                scan::handle_detected(req, &store, &ctx).await;
            }
        });
    }

    // form/update-field
    flux.on(FormUpdateReq::PATH, |path, payload, store: Arc<StateStore>| async move {
        let Some(req) = payload.downcast_ref::<FormUpdateReq>() else {
            warn!(%path, "unexpected payload");
            return;
        };
        chapa::handle_update_field(req, &store).await;
    });

    // chapa/add/submit
    {
        let ctx = ctx.clone();
        flux.on(AddSubmitReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                chapa::handle_add_submit(&store, &ctx).await;
            }
        });
    }

    // chapa/edit/load
    {
        let ctx = ctx.clone();
        flux.on(EditLoadReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<EditLoadReq>() else {
                    warn!(%path, "unexpected payload");
                    return;
                };
                chapa::handle_edit_load(req, &store, &ctx).await;
            }
        });
    }

    // chapa/edit/submit
    {
        let ctx = ctx.clone();
        flux.on(EditSubmitReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                chapa::handle_edit_submit(&store, &ctx).await;
            }
        });
    }

    // chapa/edit/convert
    {
        let ctx = ctx.clone();
        flux.on(EditConvertReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                chapa::handle_edit_convert(&store, &ctx).await;
            }
        });
    }

    // chapa/edit/delete
    flux.on(EditDeleteReq::PATH, move |_, _, store: Arc<StateStore>| {
        let ctx = ctx.clone();
        async move {
            chapa::handle_edit_delete(&store, &ctx).await;
        }
    });
}
