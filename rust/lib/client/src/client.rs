use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::InventoryApi;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::model::{Chapa, Resource, Retalho};

/// Connection settings for [`InventoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connect_timeout: Self::DEFAULT_TIMEOUT,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Use the same bound for connecting and for the whole request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

/// HTTP implementation of [`InventoryApi`].
///
/// Paths: `{base}/app/{collection}` and `{base}/app/{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl InventoryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.config.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn collection_url<T: Resource>(&self) -> String {
        self.config.endpoint.url(&format!("app/{}", T::COLLECTION))
    }

    fn item_url<T: Resource>(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url::<T>(), id)
    }

    /// Map a reqwest transport failure onto the error taxonomy.
    fn transport(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            let after = if err.is_connect() {
                self.config.connect_timeout
            } else {
                self.config.request_timeout
            };
            ApiError::Timeout(after)
        } else if err.is_connect() {
            ApiError::Unreachable(format!("{} ({})", self.config.endpoint, err))
        } else {
            ApiError::Network(err)
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        req.send().await.map_err(|e| self.transport(e))
    }

    /// Read the body of a successful response, or turn a non-2xx into `Server`.
    async fn body(&self, resp: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| self.transport(e))?;
        if !status.is_success() {
            return Err(ApiError::server(
                status.as_u16(),
                &String::from_utf8_lossy(&bytes),
            ));
        }
        Ok(bytes.to_vec())
    }

    fn decode<R: DeserializeOwned>(what: &str, bytes: &[u8]) -> Result<R, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(format!("{}: {}", what, e)))
    }

    async fn fetch<T: Resource>(&self, id: &str) -> Result<Option<T>, ApiError> {
        let url = self.item_url::<T>(id);
        debug!(%url, "GET {}", T::KIND);
        let resp = self.send(self.http.get(&url)).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let bytes = self.body(resp).await?;
        Self::decode(T::KIND, &bytes).map(Some)
    }

    /// Servers may answer a write with only `{"message": ..}`; the sent
    /// record is returned in that case.
    fn written<T: Resource>(item: &T, bytes: &[u8]) -> T {
        match serde_json::from_slice::<T>(bytes) {
            Ok(stored) => stored,
            Err(_) => item.clone(),
        }
    }

    async fn create<T: Resource>(&self, item: &T) -> Result<T, ApiError> {
        let url = self.collection_url::<T>();
        debug!(%url, id = item.id(), "POST {}", T::KIND);
        let resp = self.send(self.http.post(&url).json(item)).await?;
        let bytes = self.body(resp).await?;
        Ok(Self::written(item, &bytes))
    }

    async fn replace<T: Resource>(&self, id: &str, item: &T) -> Result<T, ApiError> {
        let url = self.item_url::<T>(id);
        debug!(%url, "PUT {}", T::KIND);
        let resp = self.send(self.http.put(&url).json(item)).await?;
        let bytes = self.body(resp).await?;
        Ok(Self::written(item, &bytes))
    }

    async fn remove<T: Resource>(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url::<T>(id);
        debug!(%url, "DELETE {}", T::KIND);
        let resp = self.send(self.http.delete(&url)).await?;
        self.body(resp).await?;
        Ok(())
    }

    async fn list<T: Resource>(&self) -> Result<Vec<T>, ApiError> {
        let url = self.collection_url::<T>();
        debug!(%url, "GET {} list", T::KIND);
        let resp = self.send(self.http.get(&url)).await?;
        let bytes = self.body(resp).await?;
        Self::decode(T::COLLECTION, &bytes)
    }
}

#[async_trait::async_trait]
impl InventoryApi for InventoryClient {
    async fn get_chapa(&self, id: &str) -> Result<Option<Chapa>, ApiError> {
        self.fetch::<Chapa>(id).await
    }

    async fn create_chapa(&self, chapa: &Chapa) -> Result<Chapa, ApiError> {
        self.create(chapa).await
    }

    async fn update_chapa(&self, id: &str, chapa: &Chapa) -> Result<Chapa, ApiError> {
        self.replace(id, chapa).await
    }

    async fn delete_chapa(&self, id: &str) -> Result<(), ApiError> {
        self.remove::<Chapa>(id).await
    }

    async fn create_retalho(&self, retalho: &Retalho) -> Result<Retalho, ApiError> {
        self.create(retalho).await
    }

    async fn list_chapas(&self) -> Result<Vec<Chapa>, ApiError> {
        self.list().await
    }

    async fn list_retalhos(&self) -> Result<Vec<Retalho>, ApiError> {
        self.list().await
    }

    async fn check_health(&self) -> Result<(), ApiError> {
        let url = self.config.endpoint.url("app/health");
        debug!(%url, "GET health");
        let resp = self.send(self.http.get(&url)).await?;
        self.body(resp).await?;
        Ok(())
    }
}
