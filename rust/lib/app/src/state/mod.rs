//! Screen state definitions.
//!
//! Each file defines the state stored at one or more well-known paths.

pub mod app;
pub mod chapa;
pub mod home;
pub mod scan;

pub use app::{AppRoute, Screen};
pub use chapa::{ChapaFormState, FormKind};
pub use home::{Connection, HomeState};
pub use scan::ScanState;
