use crate::error::KVError;

/// Key-value storage interface.
///
/// Record keys are namespaced with `:` (`chapa:12345`, `retalho:12345`).
/// Every successful `set`/`delete` is durable once it returns.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Returns whether the key existed.
    fn delete(&self, key: &str) -> Result<bool, KVError>;

    /// All `(key, value)` pairs whose key starts with `prefix`, sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;

    /// Read a UTF-8 string value.
    fn get_string(&self, key: &str) -> Result<Option<String>, KVError> {
        match self.get(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| KVError::Encoding { key: key.to_string() }),
            None => Ok(None),
        }
    }

    /// Store a UTF-8 string value.
    fn set_string(&self, key: &str, value: &str) -> Result<(), KVError> {
        self.set(key, value.as_bytes())
    }
}
