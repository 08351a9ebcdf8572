//! Landing screen state: stored at `home/state`.

use serde::{Deserialize, Serialize};

/// Server connection phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Connection {
    #[default]
    Idle,
    Testing,
    Connected,
    Disconnected,
}

impl Connection {
    /// Only a verified server unlocks the scanner.
    pub fn can_scan(self) -> bool {
        self == Connection::Connected
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeState {
    pub server_url: String,
    pub connection: Connection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HomeState {
    pub const PATH: &'static str = "home/state";
}
