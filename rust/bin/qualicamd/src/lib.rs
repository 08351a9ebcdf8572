//! QualiCam reference inventory server.
//!
//! Serves chapas and retalhos under `app/` from a redb-backed KVStore. The
//! mobile client and the `qualicam` CLI talk to this API.

pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use qualicam_kv::KVStore;

pub use error::ServiceError;
pub use routes::build_router;
pub use store::Inventory;

/// Serve the inventory API on an already-bound listener until it fails or
/// `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, kv: Arc<dyn KVStore>, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let router = build_router(Arc::new(Inventory::new(kv)));
    info!("QualiCam server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
