//! Client-side settings.
//!
//! The server address lives in `~/.qualicam/settings.redb` under
//! `server_url`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tracing::debug;

use qualicam_app::{ServerLocation, http_factory};
use qualicam_kv::{KVStore, RedbStore};

/// Default settings file: ~/.qualicam/settings.redb.
pub fn default_path() -> PathBuf {
    dirs_path().join("settings.redb")
}

/// Open the settings store and the server location it holds.
pub fn open_location(path: &Path, timeout: Duration) -> anyhow::Result<ServerLocation> {
    let kv: Arc<dyn KVStore> = Arc::new(
        RedbStore::open(path).with_context(|| format!("failed to open settings {}", path.display()))?,
    );
    let location = ServerLocation::open(kv, http_factory(timeout))?;
    debug!(path = %path.display(), server = %location.address(), "settings loaded");
    Ok(location)
}

/// Return the QualiCam config directory (~/.qualicam).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".qualicam")
}
