//! Chapa → retalho conversion: create the retalho, then delete the chapa.
//!
//! The two writes are not atomic and nothing is rolled back. A failed
//! delete leaves both records on the server.

use tracing::{info, warn};

use qualicam_client::{ApiError, InventoryApi, Retalho};

use crate::form::{ChapaFields, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Retalho not created; the chapa is untouched.
    #[error("Erro ao transformar em retalho: {0}")]
    Create(#[source] ApiError),

    /// Retalho created, chapa still present.
    #[error("Erro ao remover chapa: {source}")]
    Delete {
        retalho: Retalho,
        #[source]
        source: ApiError,
    },
}

impl ConversionError {
    /// Both records now exist and the chapa delete should be retried.
    pub fn is_partial(&self) -> bool {
        matches!(self, ConversionError::Delete { .. })
    }
}

/// Convert the chapa `id` using the edited field values.
pub async fn convert_to_retalho(
    api: &dyn InventoryApi,
    id: &str,
    fields: &ChapaFields,
) -> Result<Retalho, ConversionError> {
    let retalho = Retalho::from(fields.to_chapa(id)?);

    let created = api
        .create_retalho(&retalho)
        .await
        .map_err(ConversionError::Create)?;

    if let Err(source) = api.delete_chapa(id).await {
        warn!(id, error = %source, "retalho created but chapa delete failed");
        return Err(ConversionError::Delete {
            retalho: created,
            source,
        });
    }

    info!(id, "chapa converted to retalho");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeInventory, Failure};

    fn fields() -> ChapaFields {
        ChapaFields {
            nome_material: "Compensado".into(),
            fornecedor: "Eucatex".into(),
            tamanho: "1.2".into(),
            preco: "80".into(),
            localizacao: "B3".into(),
        }
    }

    #[tokio::test]
    async fn create_then_delete() {
        let api = FakeInventory::with_chapa(fields().to_chapa("12345").unwrap());

        let retalho = convert_to_retalho(&api, "12345", &fields()).await.unwrap();
        assert_eq!(retalho.id, "12345");
        assert_eq!(api.calls(), ["create_retalho 12345", "delete_chapa 12345"]);
        assert!(api.chapa("12345").is_none());
        assert!(api.retalho("12345").is_some());
    }

    #[tokio::test]
    async fn create_failure_never_deletes() {
        let api = FakeInventory::with_chapa(fields().to_chapa("12345").unwrap());
        api.fail("create_retalho", Failure::Status(500));

        let err = convert_to_retalho(&api, "12345", &fields()).await.unwrap_err();
        assert!(matches!(err, ConversionError::Create(_)));
        assert!(!err.is_partial());
        assert_eq!(api.calls(), ["create_retalho 12345"]);
        assert!(api.chapa("12345").is_some());
    }

    #[tokio::test]
    async fn delete_failure_leaves_both_records() {
        let api = FakeInventory::with_chapa(fields().to_chapa("12345").unwrap());
        api.fail("delete_chapa", Failure::Timeout);

        let err = convert_to_retalho(&api, "12345", &fields()).await.unwrap_err();
        match &err {
            ConversionError::Delete { retalho, source } => {
                assert_eq!(retalho.id, "12345");
                assert!(source.is_transport());
            }
            other => panic!("expected delete failure, got {other:?}"),
        }
        assert!(err.is_partial());
        assert!(api.chapa("12345").is_some());
        assert!(api.retalho("12345").is_some());
    }

    #[tokio::test]
    async fn invalid_numbers_make_no_calls() {
        let api = FakeInventory::default();
        let mut bad = fields();
        bad.preco = "oitenta".into();

        let err = convert_to_retalho(&api, "12345", &bad).await.unwrap_err();
        assert!(matches!(err, ConversionError::Invalid(ValidationError::NotANumber { .. })));
        assert!(api.calls().is_empty());
    }
}
