//! QualiCam inventory HTTP client.
//!
//! Typed access to the inventory server's `app/` REST namespace:
//! chapas (full sheets) and retalhos (remnants), plus a health check.
//!
//! # Usage
//!
//! ```ignore
//! use qualicam_client::{ClientConfig, Endpoint, InventoryApi, InventoryClient};
//!
//! let endpoint = Endpoint::parse("192.168.0.10:5000")?;
//! let client = InventoryClient::new(ClientConfig::new(endpoint))?;
//! match client.get_chapa("12345").await? {
//!     Some(chapa) => println!("found {}", chapa.nome_material),
//!     None => println!("not registered yet"),
//! }
//! ```

mod api;
mod client;
mod endpoint;
mod error;
mod model;

pub use api::InventoryApi;
pub use client::{ClientConfig, InventoryClient};
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use model::{Chapa, InvalidItemId, ItemId, Resource, Retalho};
