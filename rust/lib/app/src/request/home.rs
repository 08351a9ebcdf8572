//! Landing screen requests.

/// Persist a new server address and test it.
#[derive(Debug, Clone)]
pub struct SaveServerReq {
    pub url: String,
}

impl SaveServerReq {
    pub const PATH: &'static str = "home/save";
}
