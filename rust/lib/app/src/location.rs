//! Server location store: the persisted base address and the client bound
//! to it.
//!
//! Saves run validate → persist → rebuild client → swap → notify, one at a
//! time. Readers take an `Arc` snapshot of the current binding, so a call
//! that starts after `save` returns always sees the new address.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::{info, warn};

use qualicam_client::{ApiError, ClientConfig, Endpoint, InventoryApi, InventoryClient};
use qualicam_kv::{KVError, KVStore};

/// Builds the API client for an endpoint.
pub type ClientFactory =
    Arc<dyn Fn(&Endpoint) -> Result<Arc<dyn InventoryApi>, ApiError> + Send + Sync>;

/// Called with the new endpoint after every successful save.
pub type LocationListener = Arc<dyn Fn(&Endpoint) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("{0}")]
    Invalid(#[source] ApiError),

    #[error("storage: {0}")]
    Storage(#[from] KVError),

    #[error("client: {0}")]
    Client(#[source] ApiError),
}

/// Factory for real HTTP clients with the given connect/request timeout.
pub fn http_factory(timeout: Duration) -> ClientFactory {
    Arc::new(move |endpoint: &Endpoint| -> Result<Arc<dyn InventoryApi>, ApiError> {
        let config = ClientConfig::new(endpoint.clone()).with_timeout(timeout);
        let client: Arc<dyn InventoryApi> = Arc::new(InventoryClient::new(config)?);
        Ok(client)
    })
}

struct Binding {
    endpoint: Endpoint,
    client: Arc<dyn InventoryApi>,
}

pub struct ServerLocation {
    kv: Arc<dyn KVStore>,
    factory: ClientFactory,
    current: RwLock<Arc<Binding>>,
    listeners: RwLock<Vec<LocationListener>>,
    saving: Mutex<()>,
}

impl ServerLocation {
    pub const KEY: &'static str = "server_url";

    /// Load the persisted address, or the default when none was saved.
    pub fn open(kv: Arc<dyn KVStore>, factory: ClientFactory) -> Result<Self, LocationError> {
        let endpoint = match kv.get_string(Self::KEY)? {
            Some(raw) => Endpoint::parse(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable saved server address");
                Endpoint::default()
            }),
            None => Endpoint::default(),
        };
        let client = factory(&endpoint).map_err(LocationError::Client)?;
        info!(server = %endpoint, "server location loaded");
        Ok(Self {
            kv,
            factory,
            current: RwLock::new(Arc::new(Binding { endpoint, client })),
            listeners: RwLock::new(Vec::new()),
            saving: Mutex::new(()),
        })
    }

    pub fn address(&self) -> String {
        self.endpoint().to_string()
    }

    pub fn endpoint(&self) -> Endpoint {
        self.current.read().unwrap().endpoint.clone()
    }

    /// Client bound to the current address.
    pub fn client(&self) -> Arc<dyn InventoryApi> {
        Arc::clone(&self.current.read().unwrap().client)
    }

    /// Register a listener for address changes. Listeners run in
    /// registration order on the saving thread.
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&Endpoint) + Send + Sync + 'static,
    {
        self.listeners.write().unwrap().push(Arc::new(listener));
    }

    /// Validate, persist and switch to a new address.
    pub fn save(&self, raw: &str) -> Result<Endpoint, LocationError> {
        let _saving = self.saving.lock().unwrap();

        let endpoint = Endpoint::parse(raw).map_err(LocationError::Invalid)?;
        self.kv.set_string(Self::KEY, endpoint.as_str())?;
        let client = (self.factory)(&endpoint).map_err(LocationError::Client)?;
        *self.current.write().unwrap() = Arc::new(Binding {
            endpoint: endpoint.clone(),
            client,
        });
        info!(server = %endpoint, "server location saved");

        let listeners = self.listeners.read().unwrap().clone();
        for listener in listeners {
            listener(&endpoint);
        }
        Ok(endpoint)
    }
}
