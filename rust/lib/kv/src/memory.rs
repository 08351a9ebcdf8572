use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// In-process KVStore. Nothing survives the process; used by tests and by
/// callers that opt out of persistence.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, KVError> {
        Ok(self.entries.write().unwrap().remove(key).is_some())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
