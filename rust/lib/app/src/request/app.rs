//! App lifecycle requests.

/// Load the saved server address and test the connection.
#[derive(Debug, Clone)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Change route, e.g. `/scanner`. Refused while disconnected.
#[derive(Debug, Clone)]
pub struct NavigateReq {
    pub route: String,
}

impl NavigateReq {
    pub const PATH: &'static str = "app/navigate";
}
