//! QualiCam app core: screen state, request handlers and inventory flows.
//!
//! The rendering layer (a phone UI or the `qualicam` CLI) emits requests and
//! reads state through [`Flux`]; everything that talks to the inventory
//! server lives here.
//!
//! # Usage
//!
//! ```ignore
//! use qualicam_app::{QualiCamApp, ServerLocation, http_factory};
//! use qualicam_app::request::{InitializeReq, ScanDetectedReq};
//!
//! let location = ServerLocation::open(kv, http_factory(Duration::from_secs(10)))?;
//! let app = QualiCamApp::new(location);
//! app.flux().emit(InitializeReq::PATH, InitializeReq).await;
//! app.flux().emit(ScanDetectedReq::PATH, ScanDetectedReq { code: "12345".into() }).await;
//! let route = app.flux().get_as::<AppRoute>(AppRoute::PATH);
//! ```

pub mod context;
pub mod convert;
pub mod form;
pub mod handlers;
pub mod location;
pub mod request;
pub mod scan;
pub mod state;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use qualicam_flux::{Flux, StateValue};

pub use context::AppContext;
pub use convert::{ConversionError, convert_to_retalho};
pub use form::{ChapaFields, Field, ValidationError};
pub use handlers::register_handlers;
pub use location::{ClientFactory, LocationError, LocationListener, ServerLocation, http_factory};
pub use scan::{ScanOutcome, accept_scan, route_for};
pub use state::*;

/// A Flux instance with every QualiCam handler registered.
pub struct QualiCamApp {
    flux: Flux,
    ctx: Arc<AppContext>,
}

impl QualiCamApp {
    pub fn new(location: ServerLocation) -> Self {
        let ctx = Arc::new(AppContext::new(location));
        let flux = Flux::new();
        register_handlers(&flux, ctx.clone());
        Self { flux, ctx }
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// State at `path` as JSON, for renderers that cannot downcast.
    pub fn state_json(&self, path: &str) -> Option<serde_json::Value> {
        self.flux.get(path).and_then(|value| state_to_json(path, &value))
    }
}

fn state_to_json(path: &str, value: &StateValue) -> Option<serde_json::Value> {
    fn encode<T: serde::Serialize + 'static>(value: &StateValue) -> Option<serde_json::Value> {
        value.downcast_ref::<T>().and_then(|v| serde_json::to_value(v).ok())
    }

    match path {
        AppRoute::PATH => encode::<AppRoute>(value),
        HomeState::PATH => encode::<HomeState>(value),
        ScanState::PATH => encode::<ScanState>(value),
        ChapaFormState::ADD_PATH | ChapaFormState::EDIT_PATH => encode::<ChapaFormState>(value),
        _ => None,
    }
}
