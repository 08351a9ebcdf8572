//! Inventory records in a KVStore, keyed `{kind}:{id}`.
//!
//! Records are stored as JSON with a `dataCriacao` stamp. Creating a chapa
//! also appends an `ENTRADA` row to the movement log (`movimento:{stamp}`).

use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use qualicam_client::{Chapa, Resource, Retalho};
use qualicam_kv::KVStore;

use crate::error::ServiceError;

const CREATED: &str = "dataCriacao";
const MOVEMENT_PREFIX: &str = "movimento:";

/// Records that count as stock entering the yard when created.
pub trait Stock: Resource {
    /// Area (m²) logged as an `ENTRADA` movement on create.
    fn entry_m2(&self) -> Option<f64> {
        None
    }
}

impl Stock for Chapa {
    fn entry_m2(&self) -> Option<f64> {
        Some(self.tamanho)
    }
}

impl Stock for Retalho {}

/// A record as listed: the record fields plus its creation stamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listed<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: String,
}

/// One row of the stock movement log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id_chapa: String,
    pub tipo: String,
    pub quantidade_m2: f64,
    pub data_movimentacao: String,
}

impl Movement {
    pub const ENTRADA: &'static str = "ENTRADA";
}

pub struct Inventory {
    kv: Arc<dyn KVStore>,
    /// Serializes check-then-write sequences. Holds the last stamp handed
    /// out so stamps are strictly increasing.
    writes: Mutex<DateTime<Utc>>,
}

impl Inventory {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            writes: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    fn key<T: Resource>(id: &str) -> String {
        format!("{}:{}", T::KIND, id)
    }

    fn stamp(last: &mut DateTime<Utc>) -> String {
        let now = Utc::now().max(*last + TimeDelta::microseconds(1));
        *last = now;
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn storage(e: impl std::fmt::Display) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ServiceError> {
        serde_json::to_vec(value).map_err(Self::storage)
    }

    /// Record JSON with the creation stamp added.
    fn stamped<T: Resource>(record: &T, created: &str) -> Result<Vec<u8>, ServiceError> {
        let mut value = serde_json::to_value(record).map_err(Self::storage)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(CREATED.into(), serde_json::json!(created));
        }
        Self::encode(&value)
    }

    fn decode<T: for<'de> Deserialize<'de>>(key: &str, bytes: &[u8]) -> Result<T, ServiceError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Storage(format!("corrupt record {}: {}", key, e)))
    }

    /// Record plus its stamp. Records written without one list with `""`.
    fn decode_listed<T: Resource>(key: &str, bytes: &[u8]) -> Result<Listed<T>, ServiceError> {
        let value: serde_json::Value = Self::decode(key, bytes)?;
        let data_criacao = value[CREATED].as_str().unwrap_or_default().to_string();
        let record = serde_json::from_value(value)
            .map_err(|e| ServiceError::Storage(format!("corrupt record {}: {}", key, e)))?;
        Ok(Listed { record, data_criacao })
    }

    fn not_found<T: Resource>(id: &str) -> ServiceError {
        ServiceError::NotFound(format!("{} {} not found", T::KIND, id))
    }

    pub fn get<T: Resource>(&self, id: &str) -> Result<Option<T>, ServiceError> {
        let key = Self::key::<T>(id);
        match self.kv.get(&key)? {
            Some(bytes) => Self::decode(&key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Store a new record. `Conflict` if the id is taken.
    pub fn insert<T: Stock>(&self, record: &T) -> Result<(), ServiceError> {
        let mut last = self.writes.lock().unwrap();
        let key = Self::key::<T>(record.id());
        if self.kv.get(&key)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} {} already exists",
                T::KIND,
                record.id()
            )));
        }
        let created = Self::stamp(&mut last);
        self.kv.set(&key, &Self::stamped(record, &created)?)?;

        if let Some(m2) = record.entry_m2() {
            let movement = Movement {
                id_chapa: record.id().to_string(),
                tipo: Movement::ENTRADA.to_string(),
                quantidade_m2: m2,
                data_movimentacao: created.clone(),
            };
            let key = format!("{}{}", MOVEMENT_PREFIX, created);
            self.kv.set(&key, &Self::encode(&movement)?)?;
        }
        info!(kind = T::KIND, id = record.id(), %created, "created");
        Ok(())
    }

    /// Overwrite an existing record, keeping its creation stamp. `NotFound`
    /// if absent.
    pub fn replace<T: Resource>(&self, record: &T) -> Result<(), ServiceError> {
        let _writes = self.writes.lock().unwrap();
        let key = Self::key::<T>(record.id());
        let Some(existing) = self.kv.get(&key)? else {
            return Err(Self::not_found::<T>(record.id()));
        };
        let created = Self::decode_listed::<T>(&key, &existing)?.data_criacao;
        self.kv.set(&key, &Self::stamped(record, &created)?)?;
        info!(kind = T::KIND, id = record.id(), "updated");
        Ok(())
    }

    pub fn remove<T: Resource>(&self, id: &str) -> Result<(), ServiceError> {
        let _writes = self.writes.lock().unwrap();
        if !self.kv.delete(&Self::key::<T>(id))? {
            return Err(Self::not_found::<T>(id));
        }
        info!(kind = T::KIND, id, "deleted");
        Ok(())
    }

    /// All records of a kind, newest first. Ties (unstamped records) by id.
    pub fn list<T: Resource>(&self) -> Result<Vec<Listed<T>>, ServiceError> {
        let prefix = format!("{}:", T::KIND);
        let mut items = self
            .kv
            .scan(&prefix)?
            .into_iter()
            .map(|(key, bytes)| Self::decode_listed::<T>(&key, &bytes))
            .collect::<Result<Vec<_>, _>>()?;
        items.sort_by(|a, b| {
            b.data_criacao
                .cmp(&a.data_criacao)
                .then_with(|| a.record.id().cmp(b.record.id()))
        });
        Ok(items)
    }

    /// The movement log, oldest first.
    pub fn movements(&self) -> Result<Vec<Movement>, ServiceError> {
        self.kv
            .scan(MOVEMENT_PREFIX)?
            .into_iter()
            .map(|(key, bytes)| Self::decode(&key, &bytes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualicam_kv::MemoryStore;

    fn chapa(id: &str) -> Chapa {
        Chapa {
            id: id.into(),
            nome_material: "MDF".into(),
            fornecedor: "Duratex".into(),
            tamanho: 2.0,
            preco: 100.0,
            localizacao: "A1".into(),
        }
    }

    fn ids<T: Resource>(items: Vec<Listed<T>>) -> Vec<String> {
        items.into_iter().map(|l| l.record.id().to_string()).collect()
    }

    #[test]
    fn insert_get_conflict() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        inv.insert(&chapa("12345")).unwrap();
        assert_eq!(inv.get::<Chapa>("12345").unwrap(), Some(chapa("12345")));
        assert!(matches!(inv.insert(&chapa("12345")), Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn kinds_are_separate() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        inv.insert(&chapa("12345")).unwrap();
        assert_eq!(inv.get::<Retalho>("12345").unwrap(), None);
        inv.insert(&Retalho::from(chapa("12345"))).unwrap();
        assert_eq!(inv.list::<Retalho>().unwrap().len(), 1);
        assert_eq!(inv.list::<Chapa>().unwrap().len(), 1);
    }

    #[test]
    fn replace_and_remove_missing() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        assert!(matches!(inv.replace(&chapa("00001")), Err(ServiceError::NotFound(_))));
        assert!(matches!(inv.remove::<Chapa>("00001"), Err(ServiceError::NotFound(_))));

        inv.insert(&chapa("00001")).unwrap();
        let mut moved = chapa("00001");
        moved.localizacao = "B2".into();
        inv.replace(&moved).unwrap();
        assert_eq!(inv.get::<Chapa>("00001").unwrap().unwrap().localizacao, "B2");
        inv.remove::<Chapa>("00001").unwrap();
        assert_eq!(inv.get::<Chapa>("00001").unwrap(), None);
    }

    #[test]
    fn list_is_newest_first() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        for id in ["20000", "10000", "30000"] {
            inv.insert(&chapa(id)).unwrap();
        }
        let listed = inv.list::<Chapa>().unwrap();
        assert!(listed.iter().all(|l| l.data_criacao.ends_with('Z')));
        assert_eq!(ids(listed), ["30000", "10000", "20000"]);
    }

    #[test]
    fn replace_keeps_creation_stamp() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        inv.insert(&chapa("00001")).unwrap();
        inv.insert(&chapa("00002")).unwrap();
        let before = inv.list::<Chapa>().unwrap();

        let mut moved = chapa("00001");
        moved.localizacao = "B2".into();
        inv.replace(&moved).unwrap();

        let after = inv.list::<Chapa>().unwrap();
        assert_eq!(ids(after.clone()), ["00002", "00001"]);
        assert_eq!(after[1].data_criacao, before[1].data_criacao);
        assert_eq!(after[1].record.localizacao, "B2");
    }

    #[test]
    fn unstamped_records_still_list() {
        let kv = Arc::new(MemoryStore::new());
        kv.set("chapa:00009", &serde_json::to_vec(&chapa("00009")).unwrap()).unwrap();
        let inv = Inventory::new(kv);
        inv.insert(&chapa("00001")).unwrap();
        let listed = inv.list::<Chapa>().unwrap();
        assert_eq!(listed[1].data_criacao, "");
        assert_eq!(ids(listed), ["00001", "00009"]);
    }

    #[test]
    fn chapa_create_logs_entrada() {
        let inv = Inventory::new(Arc::new(MemoryStore::new()));
        inv.insert(&chapa("12345")).unwrap();
        inv.insert(&Retalho::from(chapa("54321"))).unwrap();
        assert!(inv.insert(&chapa("12345")).is_err());

        let log = inv.movements().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].id_chapa, "12345");
        assert_eq!(log[0].tipo, Movement::ENTRADA);
        assert_eq!(log[0].quantidade_m2, 2.0);
        let created = &inv.list::<Chapa>().unwrap()[0].data_criacao;
        assert_eq!(&log[0].data_movimentacao, created);
    }
}
