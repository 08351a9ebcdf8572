//! App-level state: stored at `app/route`.

use serde::{Deserialize, Serialize};

use qualicam_client::ItemId;

/// Navigation route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";

    pub fn screen(&self) -> Option<Screen> {
        Screen::parse(&self.0)
    }
}

/// Typed view of the routes the app knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Scanner,
    Add(ItemId),
    Edit(ItemId),
}

impl Screen {
    pub fn parse(route: &str) -> Option<Screen> {
        match route {
            "/" => Some(Screen::Home),
            "/scanner" => Some(Screen::Scanner),
            _ => {
                if let Some(id) = route.strip_prefix("/chapas/add/") {
                    ItemId::parse(id).ok().map(Screen::Add)
                } else if let Some(id) = route.strip_prefix("/chapas/edit/") {
                    ItemId::parse(id).ok().map(Screen::Edit)
                } else {
                    None
                }
            }
        }
    }

    pub fn route(&self) -> AppRoute {
        AppRoute(match self {
            Screen::Home => "/".to_string(),
            Screen::Scanner => "/scanner".to_string(),
            Screen::Add(id) => format!("/chapas/add/{}", id),
            Screen::Edit(id) => format!("/chapas/edit/{}", id),
        })
    }

    /// Screens that talk to the server and need a live connection.
    pub fn needs_connection(&self) -> bool {
        !matches!(self, Screen::Home)
    }
}
