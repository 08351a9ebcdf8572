use crate::error::ApiError;
use crate::model::{Chapa, Retalho};

/// Inventory operations the app depends on.
///
/// [`InventoryClient`](crate::InventoryClient) is the HTTP implementation;
/// tests substitute in-memory fakes.
#[async_trait::async_trait]
pub trait InventoryApi: Send + Sync + 'static {
    /// `GET app/chapas/{id}`. `Ok(None)` when the server answers 404.
    async fn get_chapa(&self, id: &str) -> Result<Option<Chapa>, ApiError>;

    /// `POST app/chapas`.
    async fn create_chapa(&self, chapa: &Chapa) -> Result<Chapa, ApiError>;

    /// `PUT app/chapas/{id}`.
    async fn update_chapa(&self, id: &str, chapa: &Chapa) -> Result<Chapa, ApiError>;

    /// `DELETE app/chapas/{id}`.
    async fn delete_chapa(&self, id: &str) -> Result<(), ApiError>;

    /// `POST app/retalhos`.
    async fn create_retalho(&self, retalho: &Retalho) -> Result<Retalho, ApiError>;

    /// `GET app/chapas`.
    async fn list_chapas(&self) -> Result<Vec<Chapa>, ApiError>;

    /// `GET app/retalhos`.
    async fn list_retalhos(&self) -> Result<Vec<Retalho>, ApiError>;

    /// `GET app/health`.
    async fn check_health(&self) -> Result<(), ApiError>;
}
