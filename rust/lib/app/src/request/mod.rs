//! Request definitions. Each request type carries the path it is emitted on.

pub mod app;
pub mod chapa;
pub mod home;
pub mod scan;

pub use app::{InitializeReq, NavigateReq};
pub use chapa::{
    AddSubmitReq, EditConvertReq, EditDeleteReq, EditLoadReq, EditSubmitReq, FormUpdateReq,
};
pub use home::SaveServerReq;
pub use scan::ScanDetectedReq;
