use super::{BlobStore, PersistenceResult, validate_key};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.blobs.lock().insert(key.into(), value.into());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> PersistenceResult<Option<String>> {
        validate_key(key)?;
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistenceResult<()> {
        validate_key(key)?;
        self.blobs.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> PersistenceResult<()> {
        validate_key(key)?;
        self.blobs.lock().remove(key);
        Ok(())
    }
}
