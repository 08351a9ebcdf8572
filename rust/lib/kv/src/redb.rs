use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

fn storage<E: Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

/// KVStore backed by redb, a pure-Rust embedded database. Each write is
/// its own committed transaction, so values survive a process restart as
/// soon as `set`/`delete` returns.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path. Missing parent
    /// directories are created.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage)?;
            }
        }
        let db = Database::create(path).map_err(storage)?;

        // Ensure the table exists so reads on a fresh file don't fail.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!(path = %path.display(), "opened redb store");
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;
        let value = table.get(key).map_err(storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.insert(key, value).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn delete(&self, key: &str) -> Result<bool, KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        let existed = {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            let removed = table.remove(key).map_err(storage)?;
            removed.is_some()
        };
        write_txn.commit().map_err(storage)?;
        Ok(existed)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let key = key.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, value.value().to_vec()));
        }
        Ok(results)
    }
}
