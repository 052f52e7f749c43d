use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::CartStorage;
use crate::error::StorageError;

/// In-process store. Clones share the same map, which lets a test keep a
/// handle to what the cart wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
