//! `app/` REST routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use qualicam_client::{Chapa, Resource, Retalho};

use crate::error::ServiceError;
use crate::store::{Inventory, Listed, Movement, Stock};

/// Build the router for the inventory API.
pub fn build_router(inventory: Arc<Inventory>) -> Router {
    Router::new()
        .route("/app/health", get(health))
        .route("/app/chapas", get(list::<Chapa>).post(create::<Chapa>))
        .route(
            "/app/chapas/{id}",
            get(get_chapa).put(update_chapa).delete(delete_chapa),
        )
        .route("/app/retalhos", get(list::<Retalho>).post(create::<Retalho>))
        .route("/app/movimentacoes", get(movements))
        .route("/version", get(version))
        .with_state(inventory)
}

/// Request body for create/update. Every field is optional here so missing
/// ones can be reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBody {
    pub id: Option<String>,
    pub nome_material: Option<String>,
    pub fornecedor: Option<String>,
    pub tamanho: Option<f64>,
    pub preco: Option<f64>,
    pub localizacao: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("Campo obrigatório: {}", field)))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    required(value.filter(|v| !v.trim().is_empty()), field)
}

impl RecordBody {
    /// Build a record. `path_id` overrides the body id (PUT).
    pub fn into_record<T: Resource + From<Chapa>>(self, path_id: Option<&str>) -> Result<T, ServiceError> {
        let id = match path_id {
            Some(id) => id.to_string(),
            None => required_text(self.id, "id")?,
        };
        let chapa = Chapa {
            id,
            nome_material: required_text(self.nome_material, "nomeMaterial")?,
            fornecedor: required_text(self.fornecedor, "fornecedor")?,
            tamanho: required(self.tamanho, "tamanho")?,
            preco: required(self.preco, "preco")?,
            localizacao: required_text(self.localizacao, "localizacao")?,
        };
        Ok(T::from(chapa))
    }
}

fn body(payload: Result<Json<RecordBody>, JsonRejection>) -> Result<RecordBody, ServiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ServiceError::Validation(format!("Dados inválidos: {}", e.body_text())))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Servidor QualiCam funcionando",
    }))
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "qualicamd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list<T: Resource>(
    State(inv): State<Arc<Inventory>>,
) -> Result<Json<Vec<Listed<T>>>, ServiceError> {
    inv.list::<T>().map(Json)
}

async fn movements(State(inv): State<Arc<Inventory>>) -> Result<Json<Vec<Movement>>, ServiceError> {
    inv.movements().map(Json)
}

async fn create<T: Stock + From<Chapa>>(
    State(inv): State<Arc<Inventory>>,
    payload: Result<Json<RecordBody>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ServiceError> {
    let record: T = body(payload)?.into_record(None)?;
    inv.insert(&record)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_chapa(
    State(inv): State<Arc<Inventory>>,
    Path(id): Path<String>,
) -> Result<Json<Chapa>, ServiceError> {
    inv.get::<Chapa>(&id)?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(format!("chapa {} not found", id)))
}

async fn update_chapa(
    State(inv): State<Arc<Inventory>>,
    Path(id): Path<String>,
    payload: Result<Json<RecordBody>, JsonRejection>,
) -> Result<Json<Chapa>, ServiceError> {
    let record: Chapa = body(payload)?.into_record(Some(&id))?;
    inv.replace(&record)?;
    Ok(Json(record))
}

async fn delete_chapa(
    State(inv): State<Arc<Inventory>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    inv.remove::<Chapa>(&id)?;
    Ok(Json(serde_json::json!({ "message": "Chapa removida com sucesso" })))
}
