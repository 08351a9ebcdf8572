//! In-memory `InventoryApi` for handler and flow tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use qualicam_client::{ApiError, Chapa, InventoryApi, Retalho};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Status(u16),
    Timeout,
}

impl Failure {
    fn error(self) -> ApiError {
        match self {
            Failure::Status(status) => ApiError::Server {
                status,
                message: "injected".into(),
            },
            Failure::Timeout => ApiError::Timeout(Duration::from_secs(10)),
        }
    }
}

/// Holds the next call until released. `entered` fires once the call is
/// parked.
#[derive(Clone, Default)]
pub(crate) struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub(crate) struct FakeInventory {
    pub label: String,
    chapas: Mutex<BTreeMap<String, Chapa>>,
    retalhos: Mutex<BTreeMap<String, Retalho>>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, Failure>>,
    gate: Mutex<Option<Gate>>,
}

impl FakeInventory {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    pub fn with_chapa(chapa: Chapa) -> Self {
        let fake = Self::default();
        fake.insert(chapa);
        fake
    }

    pub fn insert(&self, chapa: Chapa) {
        self.chapas.lock().unwrap().insert(chapa.id.clone(), chapa);
    }

    pub fn chapa(&self, id: &str) -> Option<Chapa> {
        self.chapas.lock().unwrap().get(id).cloned()
    }

    pub fn retalho(&self, id: &str) -> Option<Retalho> {
        self.retalhos.lock().unwrap().get(id).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail(&self, op: &'static str, failure: Failure) {
        self.failures.lock().unwrap().insert(op, failure);
    }

    pub fn heal(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Park the next call of any operation.
    pub fn hold(&self) -> Gate {
        let gate = Gate::default();
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    async fn enter(&self, op: &'static str, arg: &str) -> Result<(), ApiError> {
        let call = if arg.is_empty() {
            op.to_string()
        } else {
            format!("{} {}", op, arg)
        };
        self.calls.lock().unwrap().push(call);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        match self.failures.lock().unwrap().get(op) {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str, id: &str) -> ApiError {
        ApiError::Server {
            status: 404,
            message: format!("{} {} not found", what, id),
        }
    }
}

#[async_trait::async_trait]
impl InventoryApi for FakeInventory {
    async fn get_chapa(&self, id: &str) -> Result<Option<Chapa>, ApiError> {
        self.enter("get_chapa", id).await?;
        Ok(self.chapa(id))
    }

    async fn create_chapa(&self, chapa: &Chapa) -> Result<Chapa, ApiError> {
        self.enter("create_chapa", &chapa.id).await?;
        self.insert(chapa.clone());
        Ok(chapa.clone())
    }

    async fn update_chapa(&self, id: &str, chapa: &Chapa) -> Result<Chapa, ApiError> {
        self.enter("update_chapa", id).await?;
        let mut chapas = self.chapas.lock().unwrap();
        match chapas.get_mut(id) {
            Some(slot) => {
                *slot = chapa.clone();
                Ok(chapa.clone())
            }
            None => Err(Self::not_found("chapa", id)),
        }
    }

    async fn delete_chapa(&self, id: &str) -> Result<(), ApiError> {
        self.enter("delete_chapa", id).await?;
        match self.chapas.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found("chapa", id)),
        }
    }

    async fn create_retalho(&self, retalho: &Retalho) -> Result<Retalho, ApiError> {
        self.enter("create_retalho", &retalho.id).await?;
        self.retalhos
            .lock()
            .unwrap()
            .insert(retalho.id.clone(), retalho.clone());
        Ok(retalho.clone())
    }

    async fn list_chapas(&self) -> Result<Vec<Chapa>, ApiError> {
        self.enter("list_chapas", "").await?;
        Ok(self.chapas.lock().unwrap().values().cloned().collect())
    }

    async fn list_retalhos(&self) -> Result<Vec<Retalho>, ApiError> {
        self.enter("list_retalhos", "").await?;
        Ok(self.retalhos.lock().unwrap().values().cloned().collect())
    }

    async fn check_health(&self) -> Result<(), ApiError> {
        self.enter("check_health", "").await
    }
}
