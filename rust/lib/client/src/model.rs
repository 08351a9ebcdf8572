use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type that lives in one REST collection under `app/`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment: `app/{COLLECTION}`.
    const COLLECTION: &'static str;

    /// Singular name used in logs and messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// A full sheet-material record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapa {
    pub id: String,
    pub nome_material: String,
    pub fornecedor: String,
    pub tamanho: f64,
    pub preco: f64,
    pub localizacao: String,
}

/// A remnant record. Same shape as [`Chapa`], separate collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retalho {
    pub id: String,
    pub nome_material: String,
    pub fornecedor: String,
    pub tamanho: f64,
    pub preco: f64,
    pub localizacao: String,
}

impl Resource for Chapa {
    const COLLECTION: &'static str = "chapas";
    const KIND: &'static str = "chapa";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Retalho {
    const COLLECTION: &'static str = "retalhos";
    const KIND: &'static str = "retalho";

    fn id(&self) -> &str {
        &self.id
    }
}

impl From<Chapa> for Retalho {
    fn from(c: Chapa) -> Self {
        Self {
            id: c.id,
            nome_material: c.nome_material,
            fornecedor: c.fornecedor,
            tamanho: c.tamanho,
            preco: c.preco,
            localizacao: c.localizacao,
        }
    }
}

// ── ItemId ──────────────────────────────────────────────────────────

/// Inventory identifier: exactly five ASCII digits. Also the barcode payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid item id {0:?}: expected exactly 5 digits")]
pub struct InvalidItemId(pub String);

impl ItemId {
    pub const LEN: usize = 5;

    /// Validate verbatim input. No trimming: a padded payload is not an id.
    pub fn parse(s: &str) -> Result<Self, InvalidItemId> {
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidItemId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = InvalidItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
