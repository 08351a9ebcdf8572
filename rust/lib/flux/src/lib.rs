//! Flux: path-addressed state engine for the QualiCam app.
//!
//! Rust owns every screen's state and all the logic behind it; the
//! rendering layer (mobile UI or the CLI) only reads state and reacts to
//! change notifications.
//!
//! # Three Primitives
//!
//! - `get(path)`: read state at a path (Arc clone, no data copy)
//! - `emit(path, payload)`: send a request, routed to matching handler(s)
//! - `subscribe(pattern)`: observe state changes at matching paths
//!
//! # Path Addressing
//!
//! State and requests share a flat namespace with `/` as separator:
//! - Screens: `home/state`, `scan/state`, `chapa/edit`
//! - Navigation: `app/route`
//! - Actions: `scan/detected`, `chapa/edit/convert`
//!
//! # Patterns
//!
//! Subscriptions and handlers accept MQTT-style wildcards:
//! - Exact: `home/state`
//! - Single-level: `chapa/+` matches `chapa/add`, `chapa/edit`
//! - Multi-level: `chapa/#` matches everything under `chapa/`
//! - All: `#`
//!
//! # Example
//!
//! ```ignore
//! use qualicam_flux::Flux;
//!
//! let app = Flux::new();
//!
//! app.on("scan/detected", |_, payload, store| async move {
//!     store.set("scan/state", "scanning".to_string());
//! });
//!
//! app.subscribe("#", |path, _value| println!("state changed: {}", path));
//!
//! app.emit("scan/detected", "12345".to_string()).await;
//! ```

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use pattern::{Pattern, PatternTable};
pub use router::{BoxFuture, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
